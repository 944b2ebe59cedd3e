//! QR configuration store module.

mod r#trait;
pub use r#trait::QrConfigRepository;

#[cfg(any(test, feature = "mocks"))]
mod mock;
#[cfg(any(test, feature = "mocks"))]
pub use mock::MockQrConfigRepository;
