//! Domain-specific error types and error handling.

mod types;

pub use types::{ClockError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Clock(#[from] ClockError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// The clock rejection carried by this error, if any
    ///
    /// Generic validation / not-found errors are folded into their clock
    /// counterparts so callers see a single wire vocabulary.
    pub fn as_clock_error(&self) -> Option<ClockError> {
        match self {
            Self::Clock(err) => Some(err.clone()),
            Self::Token(err) => Some((*err).into()),
            Self::Validation { message } => Some(ClockError::validation(message.clone())),
            Self::NotFound { resource } => Some(ClockError::NotFound {
                resource: resource.clone(),
            }),
            Self::Storage { .. } | Self::Internal { .. } => None,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rcp_shared::ErrorResponse;

    #[test]
    fn test_token_error_maps_to_clock_codes() {
        assert_eq!(ClockError::from(TokenError::Expired).code(), "TOKEN_EXPIRED");
        assert_eq!(ClockError::from(TokenError::Invalid).code(), "TOKEN_INVALID");
        assert_eq!(TokenError::Expired.code(), "TOKEN_EXPIRED");
    }

    #[test]
    fn test_outside_geofence_carries_measurements() {
        let err = ClockError::OutsideGeofence {
            distance_meters: 212,
            radius_meters: 100,
        };
        let context = err.audit_context();
        assert_eq!(context["reason"], "OUTSIDE_GEOFENCE");
        assert_eq!(context["distanceMeters"], 212);

        let response = ErrorResponse::from(&err);
        assert_eq!(response.code, "OUTSIDE_GEOFENCE");
        let details = response.details.unwrap();
        assert_eq!(details["radiusMeters"], 100);
    }

    #[test]
    fn test_rate_limited_response_has_retry_after() {
        let err = ClockError::RateLimited {
            retry_after_seconds: 42,
        };
        let response = ErrorResponse::from(&err);
        assert_eq!(response.code, "RATE_LIMITED");
        assert_eq!(response.details.unwrap()["retryAfterSeconds"], 42);
    }

    #[test]
    fn test_domain_error_folds_into_clock_vocabulary() {
        let not_found = DomainError::NotFound {
            resource: "location".to_string(),
        };
        assert_eq!(not_found.as_clock_error().unwrap().code(), "NOT_FOUND");

        let storage = DomainError::storage("connection refused");
        assert!(storage.as_clock_error().is_none());

        let wrapped: DomainError = ClockError::AlreadyClockedIn.into();
        assert_eq!(wrapped.as_clock_error().unwrap().code(), "ALREADY_CLOCKED_IN");
        assert_eq!(wrapped.to_string(), "Already clocked in at this location");
    }
}
