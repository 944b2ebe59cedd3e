//! RCP time clock route handlers
//!
//! - `POST /qr/generate` mints a QR deep link for a location
//! - `POST /clock` runs a clock-in or clock-out attempt
//! - `GET /status` reports the worker's latest event
//! - `GET /history` lists the worker's events, newest first

pub mod clock;
pub mod generate_qr;
pub mod history;
pub mod status;

use std::sync::Arc;

use actix_web::{http::header, HttpRequest};

use rcp_core::repositories::{
    AuditLogRepository, ClockEventRepository, LocationRepository, QrConfigRepository,
};
use rcp_core::services::ClockService;

pub use clock::clock;
pub use generate_qr::generate_qr;
pub use history::history;
pub use status::status;

/// Shared state handed to every RCP handler
pub struct AppState<L, Q, E, A>
where
    L: LocationRepository,
    Q: QrConfigRepository,
    E: ClockEventRepository,
    A: AuditLogRepository + 'static,
{
    pub clock_service: Arc<ClockService<L, Q, E, A>>,
    /// Used when a QR request omits `baseUrl`
    pub public_base_url: Option<String>,
}

impl<L, Q, E, A> AppState<L, Q, E, A>
where
    L: LocationRepository,
    Q: QrConfigRepository,
    E: ClockEventRepository,
    A: AuditLogRepository + 'static,
{
    pub fn new(clock_service: Arc<ClockService<L, Q, E, A>>) -> Self {
        Self {
            clock_service,
            public_base_url: None,
        }
    }

    pub fn with_public_base_url(mut self, base_url: Option<String>) -> Self {
        self.public_base_url = base_url;
        self
    }
}

/// Client IP: first `X-Forwarded-For` hop, then `X-Real-IP`, then the peer address
pub(crate) fn extract_client_ip(req: &HttpRequest) -> Option<String> {
    if let Some(forwarded_for) = req.headers().get("X-Forwarded-For") {
        if let Ok(forwarded_str) = forwarded_for.to_str() {
            if let Some(ip) = forwarded_str.split(',').next().map(str::trim) {
                if !ip.is_empty() {
                    return Some(ip.to_string());
                }
            }
        }
    }

    if let Some(real_ip) = req.headers().get("X-Real-IP") {
        if let Ok(ip_str) = real_ip.to_str() {
            return Some(ip_str.trim().to_string());
        }
    }

    req.peer_addr().map(|addr| addr.ip().to_string())
}

pub(crate) fn extract_user_agent(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::USER_AGENT)
        .and_then(|ua| ua.to_str().ok())
        .map(|s| s.to_string())
}
