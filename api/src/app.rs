//! Application factory
//!
//! Builds the actix-web [`App`] with routes, shared state and payload error
//! handlers. Middleware is added by the caller so tests can drive the bare app.

use actix_web::{
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::InternalError,
    web, App, Error, HttpResponse,
};

use rcp_core::repositories::{
    AuditLogRepository, ClockEventRepository, LocationRepository, QrConfigRepository,
};
use rcp_shared::{error_codes, ErrorResponse};

use crate::handlers::payload_error_response;
use crate::routes::health::health_check;
use crate::routes::rcp::{clock, generate_qr, history, status, AppState};

/// Largest accepted JSON body
const JSON_LIMIT_BYTES: usize = 16 * 1024;

/// Create the application with all RCP routes
pub fn create_app<L, Q, E, A>(
    app_state: web::Data<AppState<L, Q, E, A>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
>
where
    L: LocationRepository + 'static,
    Q: QrConfigRepository + 'static,
    E: ClockEventRepository + 'static,
    A: AuditLogRepository + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(json_config())
        .app_data(query_config())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1/rcp")
                .route("/qr/generate", web::post().to(generate_qr::<L, Q, E, A>))
                .route("/clock", web::post().to(clock::<L, Q, E, A>))
                .route("/status", web::get().to(status::<L, Q, E, A>))
                .route("/history", web::get().to(history::<L, Q, E, A>)),
        )
        .default_service(web::route().to(not_found))
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT_BYTES)
        .error_handler(|err, _req| {
            let response = payload_error_response(format!("Invalid request body: {}", err));
            InternalError::from_response(err, response).into()
        })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let response = payload_error_response(format!("Invalid query string: {}", err));
        InternalError::from_response(err, response).into()
    })
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
