//! QR token payload. Tokens are ephemeral and never persisted in raw form.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Random bytes carried in every payload so two payloads never collide
pub const NONCE_BYTES: usize = 16;

/// Signed portion of a QR token
///
/// Field order is the serialization order, which the signature covers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QrTokenPayload {
    pub organization_id: Uuid,
    pub location_id: Uuid,
    /// Unix seconds
    pub issued_at: i64,
    /// Unix seconds
    pub expires_at: i64,
    /// Hex-encoded random bytes
    pub nonce: String,
}

impl QrTokenPayload {
    /// Expiry as a UTC timestamp
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.expires_at, 0).single()
    }

    /// Whether the token has expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now.timestamp()
    }
}

/// A freshly minted token and its expiry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedQrToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
