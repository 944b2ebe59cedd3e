//! Mapping from domain errors to HTTP responses
//!
//! Every rejection carries the JSON envelope `{code, message, details?, timestamp}`.
//! Storage and internal failures are logged and collapsed into a generic 500.

use actix_web::{
    http::{header, StatusCode},
    HttpResponse,
};
use tracing::error;
use validator::ValidationErrors;

use rcp_core::errors::{ClockError, DomainError};
use rcp_shared::{error_codes, ErrorResponse};

/// HTTP status for a public error code
pub fn status_for_code(code: &str) -> StatusCode {
    match code {
        error_codes::TOKEN_EXPIRED | error_codes::TOKEN_INVALID => StatusCode::UNAUTHORIZED,
        error_codes::FORBIDDEN => StatusCode::FORBIDDEN,
        error_codes::NOT_FOUND => StatusCode::NOT_FOUND,
        error_codes::VALIDATION => StatusCode::BAD_REQUEST,
        error_codes::RATE_LIMITED => StatusCode::TOO_MANY_REQUESTS,
        error_codes::LOW_ACCURACY | error_codes::OUTSIDE_GEOFENCE => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        error_codes::ALREADY_CLOCKED_IN | error_codes::ALREADY_CLOCKED_OUT => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn clock_error_response(err: &ClockError) -> HttpResponse {
    let mut builder = HttpResponse::build(status_for_code(err.code()));
    if let ClockError::RateLimited {
        retry_after_seconds,
    } = err
    {
        builder.insert_header((header::RETRY_AFTER, retry_after_seconds.to_string()));
    }
    builder.json(ErrorResponse::from(err))
}

/// Convert a service error into its HTTP response
pub fn domain_error_response(err: &DomainError) -> HttpResponse {
    match err.as_clock_error() {
        Some(clock_err) => clock_error_response(&clock_err),
        None => {
            error!(error = %err, "Request failed with an internal error");
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                error_codes::INTERNAL_ERROR,
                "An internal error occurred",
            ))
        }
    }
}

/// 400 VALIDATION listing each offending field
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION, "Invalid request data");
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.add_detail(field, messages);
    }
    HttpResponse::BadRequest().json(response)
}

/// 400 VALIDATION for bodies or query strings that fail to deserialize
pub fn payload_error_response(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::VALIDATION, message))
}
