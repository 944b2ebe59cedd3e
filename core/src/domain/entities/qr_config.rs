//! Per-location QR configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token lifetime used when a location's config is created lazily
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 3600;

/// How a location's QR token is rotated
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RotationMode {
    /// A token is minted on request and lives for the configured TTL
    #[default]
    Static,
}

impl RotationMode {
    /// Convert to string representation for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Static => "STATIC",
        }
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "STATIC" => Some(Self::Static),
            _ => None,
        }
    }
}

/// QR settings for one location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QrConfig {
    pub id: Uuid,
    pub location_id: Uuid,
    pub token_ttl_seconds: i64,
    pub rotation_mode: RotationMode,
    pub created_at: DateTime<Utc>,
}

impl QrConfig {
    /// Default config for a location (1 hour TTL, static rotation)
    pub fn new(location_id: Uuid) -> Self {
        Self::with_ttl(location_id, DEFAULT_TOKEN_TTL_SECONDS)
    }

    /// Config with an explicit token TTL
    pub fn with_ttl(location_id: Uuid, token_ttl_seconds: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            location_id,
            token_ttl_seconds,
            rotation_mode: RotationMode::Static,
            created_at: Utc::now(),
        }
    }
}
