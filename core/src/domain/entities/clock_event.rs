//! Clock event entity: one successful clock-in or clock-out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a clock event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClockEventType {
    ClockIn,
    ClockOut,
}

impl ClockEventType {
    /// Convert to string representation for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClockIn => "CLOCK_IN",
            Self::ClockOut => "CLOCK_OUT",
        }
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CLOCK_IN" => Some(Self::ClockIn),
            "CLOCK_OUT" => Some(Self::ClockOut),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClockEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recorded clock event
///
/// Append-only: created once per successful clock call and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClockEvent {
    pub id: Uuid,
    pub worker_id: Uuid,
    pub organization_id: Uuid,
    pub location_id: Uuid,
    pub event_type: ClockEventType,
    /// Server time the event was recorded
    pub happened_at: DateTime<Utc>,
    /// Time reported by the worker's device, if any
    pub client_time: Option<DateTime<Utc>>,
    pub client_latitude: f64,
    pub client_longitude: f64,
    pub accuracy_meters: Option<f64>,
    /// Distance from the location's registered coordinates, in meters
    pub distance_meters: u32,
    /// SHA-256 hex of the QR token used
    pub token_hash: String,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

impl ClockEvent {
    /// Create a new event stamped with the current server time
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        worker_id: Uuid,
        organization_id: Uuid,
        location_id: Uuid,
        event_type: ClockEventType,
        client_latitude: f64,
        client_longitude: f64,
        distance_meters: u32,
        token_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            worker_id,
            organization_id,
            location_id,
            event_type,
            happened_at: Utc::now(),
            client_time: None,
            client_latitude,
            client_longitude,
            accuracy_meters: None,
            distance_meters,
            token_hash: token_hash.into(),
            user_agent: None,
            ip_address: None,
        }
    }

    /// Add the device-reported accuracy
    pub fn with_accuracy(mut self, accuracy_meters: Option<f64>) -> Self {
        self.accuracy_meters = accuracy_meters;
        self
    }

    /// Add the device-reported timestamp
    pub fn with_client_time(mut self, client_time: Option<DateTime<Utc>>) -> Self {
        self.client_time = client_time;
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

    pub fn is_clock_in(&self) -> bool {
        self.event_type == ClockEventType::ClockIn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_round_trip_strings() {
        for t in [ClockEventType::ClockIn, ClockEventType::ClockOut] {
            assert_eq!(ClockEventType::parse(t.as_str()), Some(t));
        }
        assert_eq!(ClockEventType::parse("clock_in"), None);
    }

    #[test]
    fn test_event_type_serde_uses_wire_names() {
        assert_eq!(
            serde_json::to_string(&ClockEventType::ClockOut).unwrap(),
            "\"CLOCK_OUT\""
        );
        let parsed: ClockEventType = serde_json::from_str("\"CLOCK_IN\"").unwrap();
        assert_eq!(parsed, ClockEventType::ClockIn);
    }
}
