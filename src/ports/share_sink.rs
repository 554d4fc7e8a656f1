//! ShareSink port - hands a configuration summary to the platform.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::configurator::ShareSummary;

/// How the summary left the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Native share dialog accepted it.
    Shared,
    /// No share dialog; the link was copied instead.
    Copied,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    #[error("share cancelled")]
    Cancelled,

    #[error("sharing unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait ShareSink: Send + Sync {
    async fn share(&self, summary: &ShareSummary) -> Result<ShareOutcome, ShareError>;
}
