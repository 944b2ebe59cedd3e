//! Rate limiter trait shared by the in-memory and distributed backends

use std::fmt;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainError;

/// Counter key: one budget per worker per location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RateLimitKey {
    pub worker_id: Uuid,
    pub location_id: Uuid,
}

impl RateLimitKey {
    pub fn new(worker_id: Uuid, location_id: Uuid) -> Self {
        Self {
            worker_id,
            location_id,
        }
    }
}

impl fmt::Display for RateLimitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.worker_id, self.location_id)
    }
}

/// Outcome of a rate limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// Attempt counted; `remaining` attempts are left in the current window
    Allowed { remaining: u32 },
    /// Budget exhausted until the window resets
    Denied { retry_after_seconds: u64 },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }
}

/// Fixed-window limiter for clock attempts
///
/// Every call to [`allow`](ClockRateLimiter::allow) counts as an attempt,
/// whatever the attempt's eventual outcome.
#[async_trait]
pub trait ClockRateLimiter: Send + Sync {
    /// Count an attempt for `key` and decide whether it may proceed
    async fn allow(&self, key: &RateLimitKey) -> Result<RateLimitDecision, DomainError>;

    /// Drop counters whose window has elapsed, returning how many were removed
    async fn sweep_expired(&self) -> Result<usize, DomainError>;
}
