//! Periodic eviction of elapsed rate limit windows

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::r#trait::ClockRateLimiter;

/// Background task calling [`ClockRateLimiter::sweep_expired`] on an interval
pub struct RateLimitSweeper {
    limiter: Arc<dyn ClockRateLimiter>,
    interval: Duration,
}

impl RateLimitSweeper {
    pub fn new(limiter: Arc<dyn ClockRateLimiter>, interval_seconds: u64) -> Self {
        Self {
            limiter,
            interval: Duration::from_secs(interval_seconds.max(1)),
        }
    }

    /// Run a single sweep, returning the number of evicted windows
    pub async fn run_once(&self) -> usize {
        match self.limiter.sweep_expired().await {
            Ok(removed) => {
                debug!(removed, "Swept expired rate limit windows");
                removed
            }
            Err(e) => {
                error!(error = %e, "Rate limit sweep failed");
                0
            }
        }
    }

    /// Spawn the sweeper as a background task
    ///
    /// The first sweep runs one full interval after start.
    pub fn start_background_task(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                interval_seconds = self.interval.as_secs(),
                "Rate limit sweeper started"
            );

            let start = tokio::time::Instant::now() + self.interval;
            let mut interval_timer = tokio::time::interval_at(start, self.interval);

            loop {
                interval_timer.tick().await;
                self.run_once().await;
            }
        })
    }
}
