//! Configuration for the clock service

use rcp_shared::RcpConfig;

/// Path of the mobile clock screen the QR deep link points at
pub const DEFAULT_QR_PATH: &str = "/m/rcp";

#[derive(Debug, Clone)]
pub struct ClockServiceConfig {
    /// Path appended to the caller's base URL when building QR links
    pub qr_path: String,
    /// Reject CLOCK_OUT when the worker has never clocked in at the location
    pub require_clock_in_first: bool,
    /// Conditional append retries after losing a race with a concurrent attempt
    pub append_retries: u32,
    /// Upper bound on history page size
    pub max_history_limit: usize,
}

impl Default for ClockServiceConfig {
    fn default() -> Self {
        Self {
            qr_path: DEFAULT_QR_PATH.to_string(),
            require_clock_in_first: false,
            append_retries: 3,
            max_history_limit: 100,
        }
    }
}

impl From<&RcpConfig> for ClockServiceConfig {
    fn from(config: &RcpConfig) -> Self {
        Self {
            require_clock_in_first: config.require_clock_in_first,
            append_retries: config.append_retries,
            ..Self::default()
        }
    }
}
