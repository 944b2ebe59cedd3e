//! RCP request DTOs
//!
//! Field names are camelCase on the wire. Range and format checks run through
//! `validator` before anything reaches the clock service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use rcp_core::domain::entities::ClockEventType;
use rcp_core::domain::value_objects::{ClockCommand, IssueQrCommand};

/// Default page size for history queries
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Column limits for request metadata, in characters
pub const MAX_USER_AGENT_LEN: usize = 512;
pub const MAX_IP_LEN: usize = 64;

/// Cut `value` to at most `max` characters, on a char boundary
fn truncate_chars(mut value: String, max: usize) -> String {
    if let Some((index, _)) = value.char_indices().nth(max) {
        value.truncate(index);
    }
    value
}

/// Header values are unvalidated, so clamp them to the stored column widths
fn clamp_context(
    ip_address: Option<String>,
    user_agent: Option<String>,
) -> (Option<String>, Option<String>) {
    (
        ip_address.map(|ip| truncate_chars(ip, MAX_IP_LEN)),
        user_agent.map(|ua| truncate_chars(ua, MAX_USER_AGENT_LEN)),
    )
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQrRequest {
    pub actor_id: Uuid,
    pub organization_id: Uuid,
    pub location_id: Uuid,
    /// Origin of the mobile app; falls back to the server's public base URL
    #[validate(url)]
    pub base_url: Option<String>,
}

impl GenerateQrRequest {
    pub fn into_command(
        self,
        base_url: String,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> IssueQrCommand {
        let (ip_address, user_agent) = clamp_context(ip_address, user_agent);
        IssueQrCommand {
            actor_id: self.actor_id,
            organization_id: self.organization_id,
            location_id: self.location_id,
            base_url,
            ip_address,
            user_agent,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClockRequest {
    pub actor_id: Uuid,
    pub organization_id: Uuid,
    #[validate(length(min = 1, max = 1024))]
    pub token: String,
    #[serde(rename = "type")]
    pub event_type: ClockEventType,
    #[validate(range(min = -90.0, max = 90.0))]
    pub client_lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub client_lng: f64,
    #[validate(range(min = 0.0))]
    pub accuracy_meters: Option<f64>,
    pub client_time: Option<DateTime<Utc>>,
    #[validate(length(max = 512))]
    pub user_agent: Option<String>,
    #[validate(length(max = 64))]
    pub ip: Option<String>,
}

impl ClockRequest {
    /// Build the service command; body values win over the request's own headers
    pub fn into_command(
        self,
        header_ip: Option<String>,
        header_user_agent: Option<String>,
    ) -> ClockCommand {
        let (header_ip, header_user_agent) = clamp_context(header_ip, header_user_agent);
        let mut command = ClockCommand::new(
            self.actor_id,
            self.organization_id,
            self.token,
            self.event_type,
            self.client_lat,
            self.client_lng,
        )
        .with_request_context(
            self.ip.or(header_ip),
            self.user_agent.or(header_user_agent),
        );

        if let Some(accuracy) = self.accuracy_meters {
            command = command.with_accuracy(accuracy);
        }
        if let Some(client_time) = self.client_time {
            command = command.with_client_time(client_time);
        }
        command
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StatusQuery {
    pub actor_id: Uuid,
    pub organization_id: Uuid,
    pub location_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub actor_id: Uuid,
    pub organization_id: Uuid,
    pub location_id: Option<Uuid>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<usize>,
}

impl HistoryQuery {
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_HISTORY_LIMIT)
    }
}
