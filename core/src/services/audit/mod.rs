//! Audit service module for recording QR issuance, clock events and denials.

mod service;

pub use service::{AuditService, AuditServiceConfig};

#[cfg(test)]
mod tests;
