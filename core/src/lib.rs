//! # RCP Core
//!
//! Core domain layer for the RCP geofenced QR time clock.
//! This crate contains domain entities, the collaborator (repository)
//! interfaces, the QR token service, the clock attempt rate limiter,
//! audit recording, and the clock state machine that ties them together.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    AuditAction, AuditEntry, ClockEvent, ClockEventType, Geofence, IssuedQrToken, Location,
    QrConfig, QrTokenPayload, RotationMode,
};
pub use domain::value_objects::{
    ClockCommand, ClockEventView, ClockResult, ClockStatus, IssueQrCommand, LastEventView,
    QrIssueResult,
};
pub use errors::{ClockError, DomainError, DomainResult, TokenError};
pub use repositories::{
    AppendOutcome, AuditLogRepository, ClockEventRepository, LocationRepository,
    QrConfigRepository,
};
pub use services::{
    AuditService, AuditServiceConfig, ClockRateLimiter, ClockService, ClockServiceConfig,
    InMemoryRateLimiter, QrTokenConfig, QrTokenService, RateLimitDecision, RateLimitKey,
    RateLimitSweeper, RateLimiterConfig, SigningSecret,
};
