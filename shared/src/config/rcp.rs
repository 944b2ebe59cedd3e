//! RCP (time clock) configuration: QR token signing and clock policy

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Minimum accepted length of the HMAC signing secret, in bytes
pub const MIN_SECRET_LEN: usize = 32;

/// Environment variable holding the QR token signing secret
pub const SECRET_ENV_KEY: &str = "RCP_QR_SECRET";

/// QR token and clock-in policy configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct RcpConfig {
    /// HMAC-SHA256 secret used to sign QR tokens
    #[serde(skip_serializing)]
    pub qr_secret: String,

    /// TTL applied when a location's QR config is created lazily
    #[serde(default = "default_token_ttl")]
    pub default_token_ttl_seconds: i64,

    /// Reject CLOCK_OUT when the worker has no prior event at the location
    #[serde(default)]
    pub require_clock_in_first: bool,

    /// How many times a conflicting event append is re-validated
    #[serde(default = "default_append_retries")]
    pub append_retries: u32,
}

impl std::fmt::Debug for RcpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RcpConfig")
            .field("qr_secret", &"[redacted]")
            .field("default_token_ttl_seconds", &self.default_token_ttl_seconds)
            .field("require_clock_in_first", &self.require_clock_in_first)
            .field("append_retries", &self.append_retries)
            .finish()
    }
}

impl RcpConfig {
    /// Build a configuration around an explicit secret, using defaults elsewhere
    pub fn with_secret(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let qr_secret = secret.into();
        validate_secret(&qr_secret)?;
        Ok(Self {
            qr_secret,
            default_token_ttl_seconds: default_token_ttl(),
            require_clock_in_first: false,
            append_retries: default_append_retries(),
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup
    ///
    /// The signing secret has no default: a missing or short secret is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(SECRET_ENV_KEY)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::MissingSecret {
                key: SECRET_ENV_KEY.to_string(),
            })?;

        let mut config = Self::with_secret(secret)?;
        config.default_token_ttl_seconds = parse_or(
            &lookup,
            "RCP_DEFAULT_TOKEN_TTL_SECONDS",
            default_token_ttl(),
        )?;
        config.require_clock_in_first =
            parse_or(&lookup, "RCP_REQUIRE_CLOCK_IN_FIRST", false)?;
        config.append_retries = parse_or(&lookup, "RCP_APPEND_RETRIES", default_append_retries())?;

        if config.default_token_ttl_seconds <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "RCP_DEFAULT_TOKEN_TTL_SECONDS".to_string(),
                value: config.default_token_ttl_seconds.to_string(),
            });
        }

        Ok(config)
    }
}

fn validate_secret(secret: &str) -> Result<(), ConfigError> {
    if secret.is_empty() {
        return Err(ConfigError::MissingSecret {
            key: SECRET_ENV_KEY.to_string(),
        });
    }
    if secret.len() < MIN_SECRET_LEN {
        return Err(ConfigError::WeakSecret {
            key: SECRET_ENV_KEY.to_string(),
            min_len: MIN_SECRET_LEN,
        });
    }
    Ok(())
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}

fn default_token_ttl() -> i64 {
    3600 // 1 hour
}

fn default_append_retries() -> u32 {
    3
}
