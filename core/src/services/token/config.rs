//! Configuration for the QR token service

use std::fmt;

use rcp_shared::config::MIN_SECRET_LEN;

use crate::domain::entities::DEFAULT_TOKEN_TTL_SECONDS;
use crate::errors::DomainError;

/// HMAC key used to sign QR tokens
///
/// There is no default: a service cannot be built without an explicit secret
/// of at least [`MIN_SECRET_LEN`] bytes.
#[derive(Clone)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, DomainError> {
        let bytes = secret.into();
        if bytes.len() < MIN_SECRET_LEN {
            return Err(DomainError::Validation {
                message: format!("QR signing secret must be at least {MIN_SECRET_LEN} bytes"),
            });
        }
        Ok(Self(bytes))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}

/// Configuration for the QR token service
#[derive(Debug, Clone)]
pub struct QrTokenConfig {
    pub secret: SigningSecret,
    /// TTL given to a location whose QR config is created lazily
    pub default_ttl_seconds: i64,
}

impl QrTokenConfig {
    pub fn new(secret: SigningSecret) -> Self {
        Self {
            secret,
            default_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
        }
    }

    pub fn with_default_ttl(mut self, ttl_seconds: i64) -> Self {
        self.default_ttl_seconds = ttl_seconds;
        self
    }
}
