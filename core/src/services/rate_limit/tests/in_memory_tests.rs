//! Tests for the in-memory fixed-window limiter

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use uuid::Uuid;

use crate::services::rate_limit::{
    ClockRateLimiter, InMemoryRateLimiter, RateLimitDecision, RateLimitKey, RateLimiterConfig,
};

fn key() -> RateLimitKey {
    RateLimitKey::new(Uuid::new_v4(), Uuid::new_v4())
}

#[test]
fn test_fourth_attempt_in_window_denied() {
    let limiter = InMemoryRateLimiter::default();
    let key = key();
    let now = Instant::now();

    assert_eq!(limiter.check_at(&key, now), RateLimitDecision::Allowed { remaining: 2 });
    assert_eq!(
        limiter.check_at(&key, now + Duration::from_secs(1)),
        RateLimitDecision::Allowed { remaining: 1 }
    );
    assert_eq!(
        limiter.check_at(&key, now + Duration::from_secs(2)),
        RateLimitDecision::Allowed { remaining: 0 }
    );
    assert_eq!(
        limiter.check_at(&key, now + Duration::from_secs(10)),
        RateLimitDecision::Denied {
            retry_after_seconds: 50
        }
    );
}

#[test]
fn test_window_resets_after_elapsing() {
    let limiter = InMemoryRateLimiter::default();
    let key = key();
    let now = Instant::now();

    for _ in 0..3 {
        assert!(limiter.check_at(&key, now).is_allowed());
    }
    assert!(!limiter.check_at(&key, now + Duration::from_secs(59)).is_allowed());

    let later = now + Duration::from_secs(60);
    assert_eq!(limiter.check_at(&key, later), RateLimitDecision::Allowed { remaining: 2 });
}

#[test]
fn test_keys_are_independent() {
    let limiter = InMemoryRateLimiter::default();
    let worker = Uuid::new_v4();
    let site_a = RateLimitKey::new(worker, Uuid::new_v4());
    let site_b = RateLimitKey::new(worker, Uuid::new_v4());
    let now = Instant::now();

    for _ in 0..3 {
        limiter.check_at(&site_a, now);
    }
    assert!(!limiter.check_at(&site_a, now).is_allowed());
    assert!(limiter.check_at(&site_b, now).is_allowed());
}

#[test]
fn test_denied_attempts_do_not_extend_window() {
    let limiter = InMemoryRateLimiter::new(RateLimiterConfig {
        window_seconds: 10,
        max_attempts: 1,
        ..Default::default()
    });
    let key = key();
    let now = Instant::now();

    assert!(limiter.check_at(&key, now).is_allowed());
    for offset in 1..10 {
        assert!(!limiter
            .check_at(&key, now + Duration::from_secs(offset))
            .is_allowed());
    }
    assert!(limiter.check_at(&key, now + Duration::from_secs(10)).is_allowed());
}

#[test]
fn test_sweep_removes_only_elapsed_windows() {
    let limiter = InMemoryRateLimiter::default();
    let now = Instant::now();
    let old = key();
    let fresh = key();

    limiter.check_at(&old, now);
    limiter.check_at(&fresh, now + Duration::from_secs(30));
    assert_eq!(limiter.len(), 2);

    assert_eq!(limiter.sweep_at(now + Duration::from_secs(61)), 1);
    assert_eq!(limiter.len(), 1);
    assert_eq!(limiter.sweep_at(now + Duration::from_secs(91)), 1);
    assert!(limiter.is_empty());
}

#[tokio::test]
async fn test_concurrent_attempts_respect_budget() {
    let limiter = Arc::new(InMemoryRateLimiter::default());
    let key = key();

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let limiter = Arc::clone(&limiter);
            tokio::spawn(async move { limiter.allow(&key).await.unwrap().is_allowed() })
        })
        .collect();

    let mut allowed = 0;
    for handle in handles {
        if handle.await.unwrap() {
            allowed += 1;
        }
    }
    assert_eq!(allowed, 3);
}
