//! Configuration data models
//!
//! This module defines all configuration structures used by the checker.

pub mod checker;
pub mod logging;

// Re-export all configuration types
pub use checker::*;
pub use logging::*;

/// Default values for configuration
pub fn default_check_interval_secs() -> u64 {
    24 * 60 * 60
}

pub fn default_max_time_slip_secs() -> u64 {
    60
}

pub fn default_max_retries() -> u32 {
    5
}

pub fn default_initial_backoff_ms() -> u64 {
    1_000
}

pub fn default_max_backoff_ms() -> u64 {
    60_000
}

pub fn default_log_level() -> String {
    "info".to_string()
}
