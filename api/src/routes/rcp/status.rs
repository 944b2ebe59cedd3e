use actix_web::{web, HttpResponse};
use validator::Validate;

use rcp_core::repositories::{
    AuditLogRepository, ClockEventRepository, LocationRepository, QrConfigRepository,
};

use super::AppState;
use crate::dto::StatusQuery;
use crate::handlers::{domain_error_response, validation_error_response};

/// Handler for GET /api/v1/rcp/status?actorId=..&organizationId=..&locationId=..
///
/// Responds with `{ "lastEvent": {type, happenedAt, locationName} | null, "isClockedIn": bool }`.
pub async fn status<L, Q, E, A>(
    state: web::Data<AppState<L, Q, E, A>>,
    query: web::Query<StatusQuery>,
) -> HttpResponse
where
    L: LocationRepository + 'static,
    Q: QrConfigRepository + 'static,
    E: ClockEventRepository + 'static,
    A: AuditLogRepository + 'static,
{
    let query = query.into_inner();
    if let Err(errors) = query.validate() {
        return validation_error_response(&errors);
    }

    match state
        .clock_service
        .get_status(query.actor_id, query.organization_id, query.location_id)
        .await
    {
        Ok(status) => HttpResponse::Ok().json(status),
        Err(err) => domain_error_response(&err),
    }
}
