//! Audit entry entity for recording clock actions and denials.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Entity type recorded for QR generation entries
pub const ENTITY_LOCATION: &str = "LOCATION";

/// Entity type recorded for clock (and denied clock) entries
pub const ENTITY_CLOCK_EVENT: &str = "CLOCK_EVENT";

/// Action codes written by the clock subsystem
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    QrGenerate,
    ClockIn,
    ClockOut,
    ClockDenied,
}

impl AuditAction {
    /// Convert to string representation for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QrGenerate => "QR_GENERATE",
            Self::ClockIn => "CLOCK_IN",
            Self::ClockOut => "CLOCK_OUT",
            Self::ClockDenied => "CLOCK_DENIED",
        }
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "QR_GENERATE" => Some(Self::QrGenerate),
            "CLOCK_IN" => Some(Self::ClockIn),
            "CLOCK_OUT" => Some(Self::ClockOut),
            "CLOCK_DENIED" => Some(Self::ClockDenied),
            _ => None,
        }
    }

    /// Whether this action records a rejected attempt
    pub fn is_denial(&self) -> bool {
        matches!(self, Self::ClockDenied)
    }
}

/// Represents an audit entry handed to the external audit sink
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditEntry {
    /// Unique identifier for the entry
    pub id: Uuid,

    /// Who performed the action
    pub actor_id: Uuid,

    /// Tenant the action happened in
    pub organization_id: Uuid,

    pub action: AuditAction,

    /// Kind of entity referenced (`LOCATION`, `CLOCK_EVENT`)
    pub entity_type: String,

    /// Referenced entity, when one is known
    pub entity_id: Option<Uuid>,

    /// State before the action, if meaningful
    pub before: Option<JsonValue>,

    /// State / context after the action (distance, reason code, expiry)
    pub after: Option<JsonValue>,

    pub ip_address: Option<String>,

    pub user_agent: Option<String>,

    /// Timestamp when the action occurred
    pub created_at: DateTime<Utc>,
}

impl AuditEntry {
    /// Create a new audit entry
    pub fn new(
        actor_id: Uuid,
        organization_id: Uuid,
        action: AuditAction,
        entity_type: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            actor_id,
            organization_id,
            action,
            entity_type: entity_type.into(),
            entity_id: None,
            before: None,
            after: None,
            ip_address: None,
            user_agent: None,
            created_at: Utc::now(),
        }
    }

    /// Reference a specific entity
    pub fn with_entity(mut self, entity_id: Uuid) -> Self {
        self.entity_id = Some(entity_id);
        self
    }

    /// Attach the prior state
    pub fn with_before(mut self, before: JsonValue) -> Self {
        self.before = Some(before);
        self
    }

    /// Attach the resulting state or denial context
    pub fn with_after(mut self, after: JsonValue) -> Self {
        self.after = Some(after);
        self
    }

    /// Add request context (IP and User Agent)
    pub fn with_request_context(
        mut self,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Self {
        self.ip_address = ip_address;
        self.user_agent = user_agent;
        self
    }

    /// Reason code of a denial entry
    pub fn denial_reason(&self) -> Option<&str> {
        if !self.action.is_denial() {
            return None;
        }
        self.after.as_ref()?.get("reason")?.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_strings() {
        for action in [
            AuditAction::QrGenerate,
            AuditAction::ClockIn,
            AuditAction::ClockOut,
            AuditAction::ClockDenied,
        ] {
            assert_eq!(AuditAction::parse(action.as_str()), Some(action));
        }
        assert_eq!(AuditAction::parse("LOGIN"), None);
    }

    #[test]
    fn test_denial_reason() {
        let entry = AuditEntry::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            AuditAction::ClockDenied,
            ENTITY_CLOCK_EVENT,
        )
        .with_after(json!({ "reason": "OUTSIDE_GEOFENCE", "distanceMeters": 200 }));
        assert_eq!(entry.denial_reason(), Some("OUTSIDE_GEOFENCE"));

        let success = AuditEntry::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            AuditAction::ClockIn,
            ENTITY_CLOCK_EVENT,
        )
        .with_after(json!({ "reason": "ignored" }));
        assert_eq!(success.denial_reason(), None);
    }
}
