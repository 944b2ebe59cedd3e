//! Main QR token service implementation

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::entities::{IssuedQrToken, QrTokenPayload, NONCE_BYTES};
use crate::errors::{DomainError, TokenError};

use super::config::QrTokenConfig;

type HmacSha256 = Hmac<Sha256>;

/// Separator between the payload and signature segments
const SEGMENT_SEPARATOR: char = '.';

/// Upper bound on accepted token length; anything longer is rejected unparsed
const MAX_TOKEN_LEN: usize = 1024;

/// Service for issuing and verifying signed QR tokens
///
/// Stateless apart from the keyed MAC, so a single instance can be shared
/// across any number of concurrent requests.
#[derive(Clone)]
pub struct QrTokenService {
    mac: HmacSha256,
    default_ttl_seconds: i64,
}

impl QrTokenService {
    /// Creates a new token service from its configuration
    pub fn new(config: QrTokenConfig) -> Result<Self, DomainError> {
        let mac = HmacSha256::new_from_slice(config.secret.as_bytes()).map_err(|e| {
            DomainError::Internal {
                message: format!("Invalid HMAC key: {e}"),
            }
        })?;

        Ok(Self {
            mac,
            default_ttl_seconds: config.default_ttl_seconds,
        })
    }

    /// TTL for locations without an explicit QR config
    pub fn default_ttl_seconds(&self) -> i64 {
        self.default_ttl_seconds
    }

    /// Issues a token for a location, valid for `ttl_seconds` from now
    pub fn issue(
        &self,
        organization_id: Uuid,
        location_id: Uuid,
        ttl_seconds: i64,
    ) -> Result<IssuedQrToken, DomainError> {
        self.issue_at(organization_id, location_id, ttl_seconds, Utc::now())
    }

    /// Issues a token as if the current time were `now`
    pub fn issue_at(
        &self,
        organization_id: Uuid,
        location_id: Uuid,
        ttl_seconds: i64,
        now: DateTime<Utc>,
    ) -> Result<IssuedQrToken, DomainError> {
        if ttl_seconds <= 0 {
            return Err(DomainError::Validation {
                message: format!("Token TTL must be positive, got {ttl_seconds}"),
            });
        }

        let issued_at = now.timestamp();
        let expires_at = issued_at
            .checked_add(ttl_seconds)
            .ok_or_else(|| DomainError::Validation {
                message: format!("Token TTL {ttl_seconds} is out of range"),
            })?;

        let mut nonce = [0u8; NONCE_BYTES];
        rand::thread_rng().fill_bytes(&mut nonce);

        let payload = QrTokenPayload {
            organization_id,
            location_id,
            issued_at,
            expires_at,
            nonce: hex::encode(nonce),
        };

        let payload_bytes = serde_json::to_vec(&payload).map_err(|e| DomainError::Internal {
            message: format!("Failed to serialize token payload: {e}"),
        })?;
        let signature = self.sign(&payload_bytes);

        let token = format!(
            "{}{}{}",
            URL_SAFE_NO_PAD.encode(&payload_bytes),
            SEGMENT_SEPARATOR,
            URL_SAFE_NO_PAD.encode(signature)
        );

        let expires_at = payload.expires_at_utc().unwrap_or(now + Duration::seconds(ttl_seconds));

        Ok(IssuedQrToken { token, expires_at })
    }

    /// Verifies a token's signature and expiry
    pub fn verify(&self, token: &str) -> Result<QrTokenPayload, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verifies a token as if the current time were `now`
    ///
    /// Any structural, encoding or signature problem is `Invalid`; a genuine
    /// token past its expiry is `Expired`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<QrTokenPayload, TokenError> {
        if token.is_empty() || token.len() > MAX_TOKEN_LEN {
            return Err(TokenError::Invalid);
        }

        let (payload_segment, signature_segment) = token
            .split_once(SEGMENT_SEPARATOR)
            .ok_or(TokenError::Invalid)?;
        if payload_segment.is_empty() || signature_segment.is_empty() {
            return Err(TokenError::Invalid);
        }

        let payload_bytes = URL_SAFE_NO_PAD
            .decode(payload_segment)
            .map_err(|_| TokenError::Invalid)?;
        let provided_signature = URL_SAFE_NO_PAD
            .decode(signature_segment)
            .map_err(|_| TokenError::Invalid)?;

        let expected_signature = self.sign(&payload_bytes);
        if !constant_time_eq::constant_time_eq(&expected_signature, &provided_signature) {
            return Err(TokenError::Invalid);
        }

        let payload: QrTokenPayload =
            serde_json::from_slice(&payload_bytes).map_err(|_| TokenError::Invalid)?;

        if payload.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        Ok(payload)
    }

    /// One-way identifier for a token, stored with clock events
    pub fn hash(&self, token: &str) -> String {
        hash_token(token)
    }

    fn sign(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}

/// SHA-256 hex digest of a token
fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
