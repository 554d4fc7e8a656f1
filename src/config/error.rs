//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid URL for {field}: {value}")]
    InvalidUrl { field: &'static str, value: String },

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Reconnection attempts must be at least 1")]
    InvalidReconnectionAttempts,

    #[error("Reconnection delay must be non-zero and not exceed the maximum delay")]
    InvalidReconnectionDelay,

    #[error("Channel capacity must be at least 1")]
    InvalidChannelCapacity,

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
