//! Inputs and outputs of the clock state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{ClockEvent, ClockEventType};

/// Request to mint a QR deep link for a location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueQrCommand {
    pub actor_id: Uuid,
    pub organization_id: Uuid,
    pub location_id: Uuid,
    /// Public origin the deep link is rooted at, without trailing slash
    pub base_url: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Result of a QR issuance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QrIssueResult {
    pub qr_url: String,
    pub token_expires_at: DateTime<Utc>,
}

/// A worker's clock attempt
#[derive(Debug, Clone, PartialEq)]
pub struct ClockCommand {
    pub actor_id: Uuid,
    pub organization_id: Uuid,
    pub token: String,
    pub event_type: ClockEventType,
    pub client_latitude: f64,
    pub client_longitude: f64,
    pub accuracy_meters: Option<f64>,
    pub client_time: Option<DateTime<Utc>>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

impl ClockCommand {
    pub fn new(
        actor_id: Uuid,
        organization_id: Uuid,
        token: impl Into<String>,
        event_type: ClockEventType,
        client_latitude: f64,
        client_longitude: f64,
    ) -> Self {
        Self {
            actor_id,
            organization_id,
            token: token.into(),
            event_type,
            client_latitude,
            client_longitude,
            accuracy_meters: None,
            client_time: None,
            user_agent: None,
            ip_address: None,
        }
    }

    pub fn with_accuracy(mut self, accuracy_meters: f64) -> Self {
        self.accuracy_meters = Some(accuracy_meters);
        self
    }

    pub fn with_client_time(mut self, client_time: DateTime<Utc>) -> Self {
        self.client_time = Some(client_time);
        self
    }

    pub fn with_request_context(
        mut self,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Self {
        self.ip_address = ip_address;
        self.user_agent = user_agent;
        self
    }
}

/// Successful clock response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClockResult {
    pub ok: bool,
    pub distance_meters: u32,
    pub happened_at: DateTime<Utc>,
    pub location_name: String,
    #[serde(rename = "type")]
    pub event_type: ClockEventType,
}

impl ClockResult {
    pub fn from_event(event: &ClockEvent, location_name: impl Into<String>) -> Self {
        Self {
            ok: true,
            distance_meters: event.distance_meters,
            happened_at: event.happened_at,
            location_name: location_name.into(),
            event_type: event.event_type,
        }
    }
}

/// Summary of the latest event shown on the status screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LastEventView {
    #[serde(rename = "type")]
    pub event_type: ClockEventType,
    pub happened_at: DateTime<Utc>,
    pub location_name: String,
}

/// Current clock status of a worker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ClockStatus {
    pub last_event: Option<LastEventView>,
    pub is_clocked_in: bool,
}

impl ClockStatus {
    pub fn from_last_event(last_event: Option<LastEventView>) -> Self {
        let is_clocked_in = last_event
            .as_ref()
            .map(|event| event.event_type == ClockEventType::ClockIn)
            .unwrap_or(false);
        Self {
            last_event,
            is_clocked_in,
        }
    }
}

/// One row of a worker's clock history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClockEventView {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub event_type: ClockEventType,
    pub happened_at: DateTime<Utc>,
    pub location_id: Uuid,
    pub location_name: String,
    pub distance_meters: u32,
    pub accuracy_meters: Option<f64>,
}

impl ClockEventView {
    pub fn from_event(event: &ClockEvent, location_name: impl Into<String>) -> Self {
        Self {
            id: event.id,
            event_type: event.event_type,
            happened_at: event.happened_at,
            location_id: event.location_id,
            location_name: location_name.into(),
            distance_meters: event.distance_meters,
            accuracy_meters: event.accuracy_meters,
        }
    }
}
