//! Notice sinks.
//!
//! - `LogNoticeSink` renders notices as structured log events
//! - `RecordingNoticeSink` captures notices for test assertions

use std::sync::RwLock;

use crate::domain::realtime::{Notice, NoticeVariant};
use crate::ports::NoticeSink;

/// Emits every notice as a `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNoticeSink;

impl NoticeSink for LogNoticeSink {
    fn show(&self, notice: Notice) {
        let description = notice.description.as_deref().unwrap_or("");
        match notice.variant {
            NoticeVariant::Default => tracing::info!(
                notice_id = %notice.id,
                title = %notice.title,
                description,
                "Notice"
            ),
            NoticeVariant::Destructive => tracing::warn!(
                notice_id = %notice.id,
                title = %notice.title,
                description,
                "Notice"
            ),
        }
    }
}

/// Captures notices for testing.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned.
#[derive(Default)]
pub struct RecordingNoticeSink {
    shown: RwLock<Vec<Notice>>,
}

impl RecordingNoticeSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.shown
            .read()
            .expect("RecordingNoticeSink: lock poisoned")
            .clone()
    }

    pub fn count(&self) -> usize {
        self.shown
            .read()
            .expect("RecordingNoticeSink: lock poisoned")
            .len()
    }

    pub fn titles(&self) -> Vec<String> {
        self.notices().into_iter().map(|n| n.title).collect()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices().pop()
    }
}

impl NoticeSink for RecordingNoticeSink {
    fn show(&self, notice: Notice) {
        self.shown
            .write()
            .expect("RecordingNoticeSink: write lock poisoned")
            .push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_keeps_order() {
        let sink = RecordingNoticeSink::new();
        sink.show(Notice::new("First"));
        sink.show(Notice::new("Second").destructive());

        assert_eq!(sink.titles(), vec!["First", "Second"]);
        assert!(sink.last().unwrap().is_destructive());
    }

    #[test]
    fn log_sink_accepts_both_variants() {
        LogNoticeSink.show(Notice::new("Low Stock Alert").with_description("Only 2 units left!"));
        LogNoticeSink.show(Notice::new("Error").destructive());
    }
}
