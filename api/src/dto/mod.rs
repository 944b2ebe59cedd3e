//! Request and query payloads for the HTTP surface

pub mod rcp;

pub use rcp::{ClockRequest, GenerateQrRequest, HistoryQuery, StatusQuery};
