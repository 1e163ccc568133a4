//! Configuration loading utilities
//!
//! This module provides utilities for loading configuration from environment variables.

use super::models::*;
use crate::utils::error::{CheckerError, Result};
use std::env;
use std::str::FromStr;
use tracing::debug;

impl CheckerConfig {
    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Result<Self> {
        debug!("Loading checker configuration from environment variables");

        let mut config = Self::default();

        if let Ok(server) = env::var("NTP_SERVER") {
            config.ntp_server = server;
        }
        if let Some(interval) = parse_var("NTP_CHECK_INTERVAL_SECS")? {
            config.check_interval_secs = interval;
        }
        if let Some(slip) = parse_var("NTP_MAX_TIME_SLIP_SECS")? {
            config.max_time_slip_secs = slip;
        }
        if let Some(retries) = parse_var("NTP_MAX_RETRIES")? {
            config.retry.max_retries = retries;
        }
        if let Ok(level) = env::var("NTP_LOG_LEVEL") {
            config.logging.level = level;
        }

        debug!("Checker configuration loaded from environment variables");
        Ok(config)
    }
}

fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| CheckerError::Config(format!("Invalid {}: {}", name, e))),
        Err(_) => Ok(None),
    }
}
