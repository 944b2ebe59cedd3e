//! CORS configuration for the mobile clock app and admin web clients.
//!
//! Development is permissive. Production only accepts the origins listed in
//! `ALLOWED_ORIGINS` plus the mobile app shells.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use tracing::info;

use rcp_shared::Environment;

/// Preflight cache lifetime in seconds
pub const CORS_MAX_AGE: usize = 3600;

/// Origins used by the packaged mobile app webviews
const MOBILE_ORIGINS: &[&str] = &[
    "capacitor://localhost",
    "ionic://localhost",
    "http://localhost",
    "https://localhost",
];

/// Build the CORS middleware for `environment`
pub fn create_cors(environment: Environment, allowed_origins: &[String]) -> Cors {
    if environment.is_production() {
        create_production_cors(allowed_origins)
    } else {
        create_development_cors()
    }
}

fn create_development_cors() -> Cors {
    info!("Configuring CORS for development environment");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::USER_AGENT,
            header::HeaderName::from_static("x-requested-with"),
            header::HeaderName::from_static("x-app-version"),
        ])
        .expose_headers(vec![header::RETRY_AFTER])
        .max_age(CORS_MAX_AGE)
}

fn create_production_cors(allowed_origins: &[String]) -> Cors {
    info!(
        origins = allowed_origins.len(),
        "Configuring CORS for production environment"
    );

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-app-version"),
        ])
        .expose_headers(vec![header::RETRY_AFTER])
        .max_age(CORS_MAX_AGE);

    for origin in allowed_origins {
        cors = cors.allowed_origin(origin);
    }
    for origin in MOBILE_ORIGINS {
        cors = cors.allowed_origin(origin);
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    async fn preflight(cors: Cors, origin: &str) -> StatusCode {
        let app = test::init_service(
            App::new()
                .wrap(cors)
                .route("/ping", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;
        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/ping")
            .insert_header((header::ORIGIN, origin))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
            .to_request();
        test::call_service(&app, req).await.status()
    }

    #[actix_web::test]
    async fn test_development_allows_any_origin() {
        let cors = create_cors(Environment::Development, &[]);
        assert_eq!(preflight(cors, "https://anything.test").await, StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_production_restricts_origins() {
        let allowed = vec!["https://admin.rcp.example".to_string()];

        let cors = create_cors(Environment::Production, &allowed);
        assert_eq!(preflight(cors, "https://admin.rcp.example").await, StatusCode::OK);

        let cors = create_cors(Environment::Production, &allowed);
        assert_ne!(preflight(cors, "https://evil.example").await, StatusCode::OK);

        let cors = create_cors(Environment::Production, &allowed);
        assert_eq!(preflight(cors, "capacitor://localhost").await, StatusCode::OK);
    }
}
