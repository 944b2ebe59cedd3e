//! Shared error types and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Measured values behind the rejection (distance, radius, retry delay)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Error codes returned by the clock API
pub mod error_codes {
    pub const TOKEN_EXPIRED: &str = "TOKEN_EXPIRED";
    pub const TOKEN_INVALID: &str = "TOKEN_INVALID";
    pub const FORBIDDEN: &str = "FORBIDDEN";
    pub const RATE_LIMITED: &str = "RATE_LIMITED";
    pub const LOW_ACCURACY: &str = "LOW_ACCURACY";
    pub const OUTSIDE_GEOFENCE: &str = "OUTSIDE_GEOFENCE";
    pub const ALREADY_CLOCKED_IN: &str = "ALREADY_CLOCKED_IN";
    pub const ALREADY_CLOCKED_OUT: &str = "ALREADY_CLOCKED_OUT";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION: &str = "VALIDATION";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_details() {
        let response = ErrorResponse::new(error_codes::OUTSIDE_GEOFENCE, "Too far")
            .add_detail("distanceMeters", 212)
            .add_detail("radiusMeters", 100);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["code"], "OUTSIDE_GEOFENCE");
        assert_eq!(json["details"]["distanceMeters"], 212);
        assert_eq!(json["details"]["radiusMeters"], 100);
    }

    #[test]
    fn test_details_omitted_when_empty() {
        let json = serde_json::to_value(ErrorResponse::new("VALIDATION", "bad")).unwrap();
        assert!(json.get("details").is_none());
    }
}
