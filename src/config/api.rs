//! Storefront API configuration

use serde::Deserialize;
use std::time::Duration;
use url::Url;

use super::error::ValidationError;

/// Storefront API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Backend origin serving `/api/...`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Public storefront origin used for share links
    #[serde(default = "default_storefront_url")]
    pub storefront_url: String,

    /// Bearer token for signed-in requests
    pub token: Option<String>,
}

impl ApiConfig {
    pub fn base_url(&self) -> Result<Url, ValidationError> {
        parse_url("api.base_url", &self.base_url)
    }

    pub fn storefront_url(&self) -> Result<Url, ValidationError> {
        parse_url("api.storefront_url", &self.storefront_url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Token, if one is configured and non-blank
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Validate API configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.base_url()?;
        self.storefront_url()?;
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            storefront_url: default_storefront_url(),
            token: None,
        }
    }
}

pub(super) fn parse_url(field: &'static str, value: &str) -> Result<Url, ValidationError> {
    let url = Url::parse(value).map_err(|_| ValidationError::InvalidUrl {
        field,
        value: value.to_string(),
    })?;
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        });
    }
    Ok(url)
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_storefront_url() -> String {
    "http://localhost:3000".to_string()
}
