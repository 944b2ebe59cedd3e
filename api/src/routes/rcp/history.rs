use actix_web::{web, HttpResponse};
use validator::Validate;

use rcp_core::repositories::{
    AuditLogRepository, ClockEventRepository, LocationRepository, QrConfigRepository,
};

use super::AppState;
use crate::dto::HistoryQuery;
use crate::handlers::{domain_error_response, validation_error_response};

/// Handler for GET /api/v1/rcp/history?actorId=..&organizationId=..&locationId=..&limit=..
///
/// Responds with `{ "events": [...] }`, newest first.
pub async fn history<L, Q, E, A>(
    state: web::Data<AppState<L, Q, E, A>>,
    query: web::Query<HistoryQuery>,
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
        .get_history(
            query.actor_id,
            query.organization_id,
            query.location_id,
            query.limit(),
        )
        .await
    {
        Ok(events) => HttpResponse::Ok().json(serde_json::json!({ "events": events })),
        Err(err) => domain_error_response(&err),
    }
}
