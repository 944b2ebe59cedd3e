//! Audit sink repository module.

mod r#trait;
pub use r#trait::AuditLogRepository;

#[cfg(any(test, feature = "mocks"))]
mod mock;
#[cfg(any(test, feature = "mocks"))]
pub use mock::MockAuditLogRepository;

#[cfg(test)]
mod tests;
