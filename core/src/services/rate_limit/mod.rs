//! Clock attempt rate limiting
//!
//! Fixed-window counters keyed by `(worker, location)`. The in-memory limiter
//! is process-local; multi-instance deployments swap in a shared backend
//! behind the same [`ClockRateLimiter`] trait.

mod config;
mod in_memory;
mod sweeper;
mod r#trait;

#[cfg(test)]
mod tests;

pub use config::RateLimiterConfig;
pub use in_memory::InMemoryRateLimiter;
pub use r#trait::{ClockRateLimiter, RateLimitDecision, RateLimitKey};
pub use sweeper::RateLimitSweeper;
