//! Application configuration module
//!
//! Configuration is loaded from environment variables using the `config` and
//! `dotenvy` crates. Variables carry the `SHOWROOM` prefix and nested values
//! are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use showroom::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Storefront API at {}", config.api.base_url);
//! ```

mod api;
mod error;
mod logging;
mod realtime;

pub use api::ApiConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use realtime::{BackoffKind, RealtimeConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a config that
/// points at a local development backend.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Storefront REST API
    #[serde(default)]
    pub api: ApiConfig,

    /// Realtime notification channel
    #[serde(default)]
    pub realtime: RealtimeConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variable Format
    ///
    /// - `SHOWROOM__API__BASE_URL=https://api.example.ph` -> `api.base_url`
    /// - `SHOWROOM__REALTIME__RECONNECTION_ATTEMPTS=3` -> `realtime.reconnection_attempts`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SHOWROOM")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.api.validate()?;
        self.realtime.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
