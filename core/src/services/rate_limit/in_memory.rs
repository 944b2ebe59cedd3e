//! Process-local fixed-window rate limiter

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::errors::DomainError;

use super::config::RateLimiterConfig;
use super::r#trait::{ClockRateLimiter, RateLimitDecision, RateLimitKey};

#[derive(Debug, Clone, Copy)]
struct RateLimitEntry {
    count: u32,
    reset_at: Instant,
}

/// Mutex-guarded map of per-key windows
///
/// Entries are only evicted by [`sweep_expired`](ClockRateLimiter::sweep_expired);
/// pair the limiter with a [`super::RateLimitSweeper`] in long-running processes.
#[derive(Debug)]
pub struct InMemoryRateLimiter {
    entries: Mutex<HashMap<RateLimitKey, RateLimitEntry>>,
    window: Duration,
    max_attempts: u32,
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimiterConfig) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            window: Duration::from_secs(config.window_seconds),
            max_attempts: config.max_attempts,
        }
    }

    /// Count an attempt at `now`
    pub fn check_at(&self, key: &RateLimitKey, now: Instant) -> RateLimitDecision {
        let mut entries = self.entries();

        match entries.get_mut(key) {
            Some(entry) if now < entry.reset_at => {
                if entry.count < self.max_attempts {
                    entry.count += 1;
                    RateLimitDecision::Allowed {
                        remaining: self.max_attempts - entry.count,
                    }
                } else {
                    RateLimitDecision::Denied {
                        retry_after_seconds: retry_after(entry.reset_at - now),
                    }
                }
            }
            _ => {
                entries.insert(
                    *key,
                    RateLimitEntry {
                        count: 1,
                        reset_at: now + self.window,
                    },
                );
                RateLimitDecision::Allowed {
                    remaining: self.max_attempts.saturating_sub(1),
                }
            }
        }
    }

    /// Remove entries whose window has elapsed at `now`
    pub fn sweep_at(&self, now: Instant) -> usize {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|_, entry| entry.reset_at > now);
        before - entries.len()
    }

    /// Number of tracked keys
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<RateLimitKey, RateLimitEntry>> {
        // Entries stay consistent even if a holder panicked mid-update
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryRateLimiter {
    fn default() -> Self {
        Self::new(RateLimiterConfig::default())
    }
}

/// Whole seconds until reset, never less than one
fn retry_after(remaining: Duration) -> u64 {
    let secs = remaining.as_secs();
    let rounded = if remaining.subsec_nanos() > 0 { secs + 1 } else { secs };
    rounded.max(1)
}

#[async_trait]
impl ClockRateLimiter for InMemoryRateLimiter {
    async fn allow(&self, key: &RateLimitKey) -> Result<RateLimitDecision, DomainError> {
        Ok(self.check_at(key, Instant::now()))
    }

    async fn sweep_expired(&self) -> Result<usize, DomainError> {
        Ok(self.sweep_at(Instant::now()))
    }
}
