//! Realtime channel configuration

use serde::Deserialize;
use std::time::Duration;
use url::Url;

use super::api::parse_url;
use super::error::ValidationError;
use crate::application::RealtimeClientConfig;
use crate::domain::realtime::ReconnectPolicy;

/// Realtime channel configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RealtimeConfig {
    /// Socket.IO server origin
    #[serde(default = "default_url")]
    pub url: String,

    /// Consecutive failed attempts before giving up
    #[serde(default = "default_attempts")]
    pub reconnection_attempts: u32,

    /// Delay between attempts in milliseconds
    #[serde(default = "default_delay")]
    pub reconnection_delay_ms: u64,

    /// Upper bound for exponential backoff in milliseconds
    #[serde(default = "default_delay_max")]
    pub reconnection_delay_max_ms: u64,

    /// Delay growth between attempts
    #[serde(default)]
    pub backoff: BackoffKind,

    /// Buffer size for outbound signals and local broadcasts
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

/// Delay growth
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackoffKind {
    #[default]
    Fixed,
    Exponential,
}

impl RealtimeConfig {
    pub fn url(&self) -> Result<Url, ValidationError> {
        parse_url("realtime.url", &self.url)
    }

    /// Reconnection policy described by this configuration
    pub fn reconnect_policy(&self) -> ReconnectPolicy {
        let delay = Duration::from_millis(self.reconnection_delay_ms);
        match self.backoff {
            BackoffKind::Fixed => ReconnectPolicy::fixed(self.reconnection_attempts, delay),
            BackoffKind::Exponential => ReconnectPolicy::exponential(
                self.reconnection_attempts,
                delay,
                Duration::from_millis(self.reconnection_delay_max_ms),
            ),
        }
    }

    pub fn client_config(&self) -> RealtimeClientConfig {
        RealtimeClientConfig {
            reconnect: self.reconnect_policy(),
            outbound_capacity: self.channel_capacity,
        }
    }

    /// Validate realtime configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.url()?;
        if self.reconnection_attempts == 0 {
            return Err(ValidationError::InvalidReconnectionAttempts);
        }
        if self.reconnection_delay_ms == 0
            || self.reconnection_delay_ms > self.reconnection_delay_max_ms
        {
            return Err(ValidationError::InvalidReconnectionDelay);
        }
        if self.channel_capacity == 0 {
            return Err(ValidationError::InvalidChannelCapacity);
        }
        Ok(())
    }
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            reconnection_attempts: default_attempts(),
            reconnection_delay_ms: default_delay(),
            reconnection_delay_max_ms: default_delay_max(),
            backoff: BackoffKind::default(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

fn default_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_attempts() -> u32 {
    5
}

fn default_delay() -> u64 {
    1000
}

fn default_delay_max() -> u64 {
    5000
}

fn default_channel_capacity() -> usize {
    64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::realtime::Backoff;

    #[test]
    fn test_realtime_defaults_match_reconnect_policy_defaults() {
        let config = RealtimeConfig::default();
        assert_eq!(config.reconnect_policy(), ReconnectPolicy::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_exponential_backoff_uses_max_delay() {
        let config = RealtimeConfig {
            backoff: BackoffKind::Exponential,
            ..Default::default()
        };
        assert_eq!(
            config.reconnect_policy().backoff,
            Backoff::Exponential {
                max_delay: Duration::from_millis(5000)
            }
        );
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let config = RealtimeConfig {
            reconnection_attempts: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidReconnectionAttempts)
        );
    }

    #[test]
    fn test_delay_above_max_rejected() {
        let config = RealtimeConfig {
            reconnection_delay_ms: 10_000,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidReconnectionDelay)
        );
    }
}
