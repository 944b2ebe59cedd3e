//! Redis-backed clock attempt limiter
//!
//! Shares one fixed-window budget per `(worker, location)` across every
//! instance. Keys expire with their window, so there is nothing to sweep.

use async_trait::async_trait;
use tracing::warn;

use rcp_core::errors::DomainError;
use rcp_core::services::{ClockRateLimiter, RateLimitDecision, RateLimitKey, RateLimiterConfig};

use crate::cache::{RedisClient, WindowCount};

pub struct RedisClockRateLimiter {
    client: RedisClient,
    window_seconds: u64,
    max_attempts: u32,
}

impl RedisClockRateLimiter {
    pub fn new(client: RedisClient, config: RateLimiterConfig) -> Self {
        Self {
            client,
            window_seconds: config.window_seconds,
            max_attempts: config.max_attempts,
        }
    }

    fn counter_key(&self, key: &RateLimitKey) -> String {
        self.client.key(&format!("rate:{}", key))
    }
}

/// Map a window counter onto a decision for a budget of `max_attempts`
fn decide(window: WindowCount, max_attempts: u32) -> RateLimitDecision {
    let max = u64::from(max_attempts);
    if window.count > max {
        RateLimitDecision::Denied {
            retry_after_seconds: window.ttl_seconds.max(1),
        }
    } else {
        RateLimitDecision::Allowed {
            remaining: (max - window.count) as u32,
        }
    }
}

#[async_trait]
impl ClockRateLimiter for RedisClockRateLimiter {
    async fn allow(&self, key: &RateLimitKey) -> Result<RateLimitDecision, DomainError> {
        let window = self
            .client
            .hit_window(&self.counter_key(key), self.window_seconds)
            .await?;

        let decision = decide(window, self.max_attempts);
        if !decision.is_allowed() {
            warn!(
                worker_id = %key.worker_id,
                location_id = %key.location_id,
                attempts = window.count,
                "Clock attempts rate limited"
            );
        }
        Ok(decision)
    }

    async fn sweep_expired(&self) -> Result<usize, DomainError> {
        Ok(0)
    }
}
