//! Configuration validation
//!
//! This module provides validation logic for all configuration structures.

use super::models::*;
use crate::utils::error::{CheckerError, Result};
use tracing::debug;

/// Trait for validating configuration
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

impl Validate for CheckerConfig {
    fn validate(&self) -> Result<()> {
        debug!("Validating checker configuration");

        if self.ntp_server.trim().is_empty() {
            return Err(CheckerError::Validation(
                "ntp_server must not be empty".to_string(),
            ));
        }

        if self.ntp_server.chars().any(char::is_whitespace) {
            return Err(CheckerError::Validation(format!(
                "ntp_server must not contain whitespace: {:?}",
                self.ntp_server
            )));
        }

        if self.check_interval_secs == 0 {
            return Err(CheckerError::Validation(
                "check_interval_secs must be greater than 0".to_string(),
            ));
        }

        if self.max_time_slip_secs == 0 {
            return Err(CheckerError::Validation(
                "max_time_slip_secs must be greater than 0".to_string(),
            ));
        }

        if self.max_time_slip_secs > MAX_TIME_SLIP_SECS {
            return Err(CheckerError::Validation(format!(
                "max_time_slip_secs must not exceed {}",
                MAX_TIME_SLIP_SECS
            )));
        }

        self.retry.validate()?;
        self.logging.validate()?;

        Ok(())
    }
}

impl Validate for RetryConfig {
    fn validate(&self) -> Result<()> {
        if self.initial_backoff_ms == 0 {
            return Err(CheckerError::Validation(
                "retry.initial_backoff_ms must be greater than 0".to_string(),
            ));
        }

        if self.max_backoff_ms < self.initial_backoff_ms {
            return Err(CheckerError::Validation(format!(
                "retry.max_backoff_ms ({}) must not be smaller than retry.initial_backoff_ms ({})",
                self.max_backoff_ms, self.initial_backoff_ms
            )));
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<()> {
        if self.level.trim().is_empty() {
            return Err(CheckerError::Validation(
                "logging.level must not be empty".to_string(),
            ));
        }

        tracing_subscriber::EnvFilter::try_new(&self.level).map_err(|e| {
            CheckerError::Validation(format!("Invalid logging.level {:?}: {}", self.level, e))
        })?;

        Ok(())
    }
}
