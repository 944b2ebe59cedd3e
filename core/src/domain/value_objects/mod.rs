//! Value objects representing immutable domain concepts.

pub mod clock;

// Re-export commonly used types
pub use clock::{
    ClockCommand, ClockEventView, ClockResult, ClockStatus, IssueQrCommand, LastEventView,
    QrIssueResult,
};
