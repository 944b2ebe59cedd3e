//! QR token service module
//!
//! Tokens are `base64url(payload) "." base64url(hmac_sha256(secret, payload))`
//! with a camelCase JSON payload. They are location-bound, time-bound and
//! deliberately multi-use within their TTL.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::{QrTokenConfig, SigningSecret};
pub use service::QrTokenService;
