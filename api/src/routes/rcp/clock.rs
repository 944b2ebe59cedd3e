use actix_web::{web, HttpRequest, HttpResponse};
use tracing::{info, warn};
use validator::Validate;

use rcp_core::repositories::{
    AuditLogRepository, ClockEventRepository, LocationRepository, QrConfigRepository,
};

use super::{extract_client_ip, extract_user_agent, AppState};
use crate::dto::ClockRequest;
use crate::handlers::{domain_error_response, validation_error_response};

/// Handler for POST /api/v1/rcp/clock
///
/// # Request Body
///
/// ```json
/// {
///     "actorId": "7d0c...",
///     "organizationId": "1f4e...",
///     "token": "eyJvcmdh...",
///     "type": "CLOCK_IN",
///     "clientLat": 52.2297,
///     "clientLng": 21.0122,
///     "accuracyMeters": 12.5
/// }
/// ```
///
/// `userAgent` and `ip` are optional; the request's own headers fill them in.
///
/// # Response
///
/// ```json
/// { "ok": true, "distanceMeters": 42, "happenedAt": "...", "locationName": "Warsaw Office", "type": "CLOCK_IN" }
/// ```
pub async fn clock<L, Q, E, A>(
    req: HttpRequest,
    state: web::Data<AppState<L, Q, E, A>>,
    request: web::Json<ClockRequest>,
) -> HttpResponse
where
    L: LocationRepository + 'static,
    Q: QrConfigRepository + 'static,
    E: ClockEventRepository + 'static,
    A: AuditLogRepository + 'static,
{
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        warn!(worker_id = %request.actor_id, "Rejected clock request: {}", errors);
        return validation_error_response(&errors);
    }

    let command = request.into_command(extract_client_ip(&req), extract_user_agent(&req));
    let worker_id = command.actor_id;
    let event_type = command.event_type;

    match state.clock_service.clock(command).await {
        Ok(result) => {
            info!(%worker_id, %event_type, distance_meters = result.distance_meters, "Clock accepted");
            HttpResponse::Ok().json(result)
        }
        Err(err) => domain_error_response(&err),
    }
}
