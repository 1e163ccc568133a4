//! Checker configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Largest `max_time_slip_secs` whose tolerance fits in a [`chrono::TimeDelta`]
pub const MAX_TIME_SLIP_SECS: u64 = i64::MAX as u64 / 1000;

/// Synchronization checker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// Remote time source queried by each probe
    pub ntp_server: String,
    /// Recheck period in seconds
    #[serde(default = "default_check_interval_secs")]
    pub check_interval_secs: u64,
    /// Maximum accepted clock slip in seconds; probes tolerate half of it
    #[serde(default = "default_max_time_slip_secs")]
    pub max_time_slip_secs: u64,
    /// Probe retry policy
    #[serde(default)]
    pub retry: RetryConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            ntp_server: "pool.ntp.org".to_string(),
            check_interval_secs: default_check_interval_secs(),
            max_time_slip_secs: default_max_time_slip_secs(),
            retry: RetryConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl CheckerConfig {
    /// Create a configuration for the given server with default settings
    pub fn new(ntp_server: impl Into<String>) -> Self {
        Self {
            ntp_server: ntp_server.into(),
            ..Self::default()
        }
    }

    /// Set the recheck interval.
    ///
    /// The interval is stored in whole seconds; any sub-second part is dropped.
    pub fn with_check_interval(mut self, interval: Duration) -> Self {
        self.check_interval_secs = interval.as_secs();
        self
    }

    /// Set the retry configuration
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Recheck period
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }

    /// Largest clock offset a probe still reports as synchronized.
    ///
    /// Saturates at [`TimeDelta::MAX`](chrono::TimeDelta::MAX) for slips that
    /// validation would reject.
    pub fn slip_tolerance(&self) -> chrono::TimeDelta {
        i64::try_from(self.max_time_slip_secs)
            .ok()
            .and_then(|secs| secs.checked_mul(500))
            .and_then(chrono::TimeDelta::try_milliseconds)
            .unwrap_or(chrono::TimeDelta::MAX)
    }

    /// Merge checker configurations (other takes precedence over defaults)
    pub fn merge(mut self, other: Self) -> Self {
        if !other.ntp_server.is_empty() {
            self.ntp_server = other.ntp_server;
        }
        if other.check_interval_secs != default_check_interval_secs() {
            self.check_interval_secs = other.check_interval_secs;
        }
        if other.max_time_slip_secs != default_max_time_slip_secs() {
            self.max_time_slip_secs = other.max_time_slip_secs;
        }
        self.retry = self.retry.merge(other.retry);
        self.logging = self.logging.merge(other.logging);
        self
    }
}

/// Retry configuration for probe work
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetryConfig {
    /// Retries after the first failed attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Delay before the first retry in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
    /// Upper bound on the retry delay in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

impl RetryConfig {
    /// Merge retry configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.max_retries != default_max_retries() {
            self.max_retries = other.max_retries;
        }
        if other.initial_backoff_ms != default_initial_backoff_ms() {
            self.initial_backoff_ms = other.initial_backoff_ms;
        }
        if other.max_backoff_ms != default_max_backoff_ms() {
            self.max_backoff_ms = other.max_backoff_ms;
        }
        self
    }
}
