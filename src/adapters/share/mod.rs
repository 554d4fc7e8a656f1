//! Share sinks.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::configurator::ShareSummary;
use crate::ports::{ShareError, ShareOutcome, ShareSink};

/// Headless fallback: there is no share dialog, so the text is logged
/// and reported as copied.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogShareSink;

#[async_trait]
impl ShareSink for LogShareSink {
    async fn share(&self, summary: &ShareSummary) -> Result<ShareOutcome, ShareError> {
        tracing::info!(url = %summary.url, text = %summary.to_text(), "Configuration shared");
        Ok(ShareOutcome::Copied)
    }
}

/// Test double returning a fixed result and capturing what was shared.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned.
pub struct RecordingShareSink {
    result: Result<ShareOutcome, ShareError>,
    shared: Mutex<Vec<ShareSummary>>,
}

impl RecordingShareSink {
    pub fn new(result: Result<ShareOutcome, ShareError>) -> Self {
        Self {
            result,
            shared: Mutex::new(Vec::new()),
        }
    }

    pub fn shared(&self) -> Vec<ShareSummary> {
        self.shared
            .lock()
            .expect("RecordingShareSink: lock poisoned")
            .clone()
    }
}

#[async_trait]
impl ShareSink for RecordingShareSink {
    async fn share(&self, summary: &ShareSummary) -> Result<ShareOutcome, ShareError> {
        self.shared
            .lock()
            .expect("RecordingShareSink: lock poisoned")
            .push(summary.clone());
        self.result.clone()
    }
}
