//! Collaborator interfaces consumed by the clock services.
//!
//! Each collaborator is a trait with an in-memory mock (behind the `mocks`
//! feature) for tests; production implementations live in `rcp_infra`.

pub mod audit;
pub mod clock_event;
pub mod location;
pub mod qr_config;

pub use audit::AuditLogRepository;
pub use clock_event::{AppendOutcome, ClockEventRepository};
pub use location::LocationRepository;
pub use qr_config::QrConfigRepository;

#[cfg(any(test, feature = "mocks"))]
pub use audit::MockAuditLogRepository;
#[cfg(any(test, feature = "mocks"))]
pub use clock_event::MockClockEventRepository;
#[cfg(any(test, feature = "mocks"))]
pub use location::MockLocationRepository;
#[cfg(any(test, feature = "mocks"))]
pub use qr_config::MockQrConfigRepository;

#[cfg(any(test, feature = "mocks"))]
pub(crate) fn lock<T>(mutex: &std::sync::Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[cfg(any(test, feature = "mocks"))]
pub(crate) fn mock_failure() -> crate::errors::DomainError {
    crate::errors::DomainError::storage("Mock repository error")
}
