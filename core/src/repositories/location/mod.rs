//! Location directory module.

mod r#trait;
pub use r#trait::LocationRepository;

#[cfg(any(test, feature = "mocks"))]
mod mock;
#[cfg(any(test, feature = "mocks"))]
pub use mock::MockLocationRepository;
