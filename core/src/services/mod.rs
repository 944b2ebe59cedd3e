//! Business services containing domain logic and use cases.

pub mod audit;
pub mod clock;
pub mod rate_limit;
pub mod token;

// Re-export commonly used types
pub use audit::{AuditService, AuditServiceConfig};
pub use clock::{ClockService, ClockServiceConfig};
pub use rate_limit::{
    ClockRateLimiter, InMemoryRateLimiter, RateLimitDecision, RateLimitKey, RateLimitSweeper,
    RateLimiterConfig,
};
pub use token::{QrTokenConfig, QrTokenService, SigningSecret};
