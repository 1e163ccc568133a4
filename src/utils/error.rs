//! Error handling for the checker
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for the checker
pub type Result<T> = std::result::Result<T, CheckerError>;

/// Main error type for the checker
#[derive(Error, Debug)]
pub enum CheckerError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Probe errors (unreachable server, malformed reply, ...)
    #[error("Probe error: {0}")]
    Probe(String),

    /// Logging setup errors
    #[error("Logging error: {0}")]
    Logging(String),
}

impl CheckerError {
    /// Create a probe error
    pub fn probe(message: impl Into<String>) -> Self {
        Self::Probe(message.into())
    }

    /// Whether the error came from configuration loading or validation
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::Validation(_) | Self::Yaml(_)
        )
    }
}
