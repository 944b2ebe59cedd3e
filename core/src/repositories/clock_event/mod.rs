//! Clock event store module.

mod r#trait;
pub use r#trait::{AppendOutcome, ClockEventRepository};

#[cfg(any(test, feature = "mocks"))]
mod mock;
#[cfg(any(test, feature = "mocks"))]
pub use mock::MockClockEventRepository;
