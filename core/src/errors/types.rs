//! Typed failures of the token service and the clock pipeline.
//!
//! Every clock rejection maps onto exactly one wire code from
//! [`rcp_shared::error_codes`]; the measured values behind a rejection travel
//! with the variant so the presentation layer can echo them back.

use rcp_shared::{error_codes, ErrorResponse};
use thiserror::Error;

/// Token verification failure
///
/// Never raised as a panic; malformed attacker input resolves to `Invalid`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token signature or structure is invalid")]
    Invalid,

    #[error("Token expired")]
    Expired,
}

impl TokenError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Invalid => error_codes::TOKEN_INVALID,
            Self::Expired => error_codes::TOKEN_EXPIRED,
        }
    }
}

/// Rejections produced by the clock pipeline and QR issuance
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClockError {
    #[error("QR token has expired")]
    TokenExpired,

    #[error("QR token is invalid")]
    TokenInvalid,

    #[error("Forbidden: {reason}")]
    Forbidden { reason: String },

    #[error("Too many clock attempts, retry in {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },

    #[error("GPS accuracy {accuracy_meters}m exceeds allowed {max_accuracy_meters}m")]
    LowAccuracy {
        accuracy_meters: f64,
        max_accuracy_meters: f64,
    },

    #[error("Outside geofence: {distance_meters}m from location, allowed radius {radius_meters}m")]
    OutsideGeofence {
        distance_meters: u32,
        radius_meters: u32,
    },

    #[error("Already clocked in at this location")]
    AlreadyClockedIn,

    #[error("Already clocked out at this location")]
    AlreadyClockedOut,

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl ClockError {
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Wire code for this rejection
    pub fn code(&self) -> &'static str {
        match self {
            Self::TokenExpired => error_codes::TOKEN_EXPIRED,
            Self::TokenInvalid => error_codes::TOKEN_INVALID,
            Self::Forbidden { .. } => error_codes::FORBIDDEN,
            Self::RateLimited { .. } => error_codes::RATE_LIMITED,
            Self::LowAccuracy { .. } => error_codes::LOW_ACCURACY,
            Self::OutsideGeofence { .. } => error_codes::OUTSIDE_GEOFENCE,
            Self::AlreadyClockedIn => error_codes::ALREADY_CLOCKED_IN,
            Self::AlreadyClockedOut => error_codes::ALREADY_CLOCKED_OUT,
            Self::NotFound { .. } => error_codes::NOT_FOUND,
            Self::Validation { .. } => error_codes::VALIDATION,
        }
    }

    /// Context recorded alongside a denial audit entry
    pub fn audit_context(&self) -> serde_json::Value {
        let mut context = serde_json::json!({ "reason": self.code() });
        match self {
            Self::Forbidden { reason } => {
                context["detail"] = serde_json::json!(reason);
            }
            Self::RateLimited {
                retry_after_seconds,
            } => {
                context["retryAfterSeconds"] = serde_json::json!(retry_after_seconds);
            }
            Self::LowAccuracy {
                accuracy_meters,
                max_accuracy_meters,
            } => {
                context["accuracyMeters"] = serde_json::json!(accuracy_meters);
                context["maxAccuracyMeters"] = serde_json::json!(max_accuracy_meters);
            }
            Self::OutsideGeofence {
                distance_meters,
                radius_meters,
            } => {
                context["distanceMeters"] = serde_json::json!(distance_meters);
                context["radiusMeters"] = serde_json::json!(radius_meters);
            }
            _ => {}
        }
        context
    }
}

impl From<TokenError> for ClockError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid => Self::TokenInvalid,
            TokenError::Expired => Self::TokenExpired,
        }
    }
}

impl From<&ClockError> for ErrorResponse {
    fn from(err: &ClockError) -> Self {
        let response = ErrorResponse::new(err.code(), err.to_string());
        match err {
            ClockError::RateLimited {
                retry_after_seconds,
            } => response.add_detail("retryAfterSeconds", retry_after_seconds),
            ClockError::LowAccuracy {
                accuracy_meters,
                max_accuracy_meters,
            } => response
                .add_detail("accuracyMeters", accuracy_meters)
                .add_detail("maxAccuracyMeters", max_accuracy_meters),
            ClockError::OutsideGeofence {
                distance_meters,
                radius_meters,
            } => response
                .add_detail("distanceMeters", distance_meters)
                .add_detail("radiusMeters", radius_meters),
            _ => response,
        }
    }
}
