use actix_web::{web, HttpRequest, HttpResponse};
use tracing::{info, warn};
use validator::Validate;

use rcp_core::repositories::{
    AuditLogRepository, ClockEventRepository, LocationRepository, QrConfigRepository,
};

use super::{extract_client_ip, extract_user_agent, AppState};
use crate::dto::GenerateQrRequest;
use crate::handlers::{domain_error_response, payload_error_response, validation_error_response};

/// Handler for POST /api/v1/rcp/qr/generate
///
/// # Request Body
///
/// ```json
/// {
///     "actorId": "7d0c...",
///     "organizationId": "1f4e...",
///     "locationId": "9a21...",
///     "baseUrl": "https://app.example.com"
/// }
/// ```
///
/// # Response
///
/// ```json
/// { "qrUrl": "https://app.example.com/m/rcp?token=...", "tokenExpiresAt": "2024-03-01T10:00:00Z" }
/// ```
pub async fn generate_qr<L, Q, E, A>(
    req: HttpRequest,
    state: web::Data<AppState<L, Q, E, A>>,
    request: web::Json<GenerateQrRequest>,
) -> HttpResponse
where
    L: LocationRepository + 'static,
    Q: QrConfigRepository + 'static,
    E: ClockEventRepository + 'static,
    A: AuditLogRepository + 'static,
{
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        warn!(location_id = %request.location_id, "Rejected QR request: {}", errors);
        return validation_error_response(&errors);
    }

    let Some(base_url) = request
        .base_url
        .clone()
        .or_else(|| state.public_base_url.clone())
    else {
        return payload_error_response("baseUrl is required");
    };

    let command = request.into_command(base_url, extract_client_ip(&req), extract_user_agent(&req));
    let location_id = command.location_id;

    match state.clock_service.issue_qr(command).await {
        Ok(result) => {
            info!(%location_id, expires_at = %result.token_expires_at, "QR generated");
            HttpResponse::Ok().json(result)
        }
        Err(err) => domain_error_response(&err),
    }
}
