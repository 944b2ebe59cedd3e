//! Clock state machine
//!
//! Issues QR deep links for locations, runs the clock attempt validation
//! pipeline and answers status / history queries.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::ClockServiceConfig;
pub use service::ClockService;
