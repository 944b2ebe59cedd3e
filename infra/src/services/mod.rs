//! Infrastructure implementations of core service traits

pub mod rate_limiter;

pub use rate_limiter::RedisClockRateLimiter;
