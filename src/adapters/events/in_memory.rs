//! In-memory signal publisher for testing.
//!
//! Captures every published `LocalSignal` for assertions.
//!
//! # Security Note
//!
//! This adapter is for **testing only**. It uses `.expect()` on lock
//! operations which will panic if locks are poisoned. Production code should
//! use `LocalEventBus`.

use std::sync::RwLock;

use crate::domain::realtime::LocalSignal;
use crate::ports::LocalEventPublisher;

/// In-memory signal publisher for testing.
///
/// # Example
///
/// ```ignore
/// let signals = Arc::new(InMemorySignalPublisher::new());
/// // ... drive the client ...
/// assert_eq!(signals.signal_count(), 1);
/// assert!(signals.has_signal("vehicle-updated"));
/// ```
#[derive(Default)]
pub struct InMemorySignalPublisher {
    published: RwLock<Vec<LocalSignal>>,
}

impl InMemorySignalPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    // === Test Helpers ===

    /// Returns all published signals.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn published_signals(&self) -> Vec<LocalSignal> {
        self.published
            .read()
            .expect("InMemorySignalPublisher: published lock poisoned")
            .clone()
    }

    /// Returns signals with the given name.
    pub fn signals_named(&self, name: &str) -> Vec<LocalSignal> {
        self.published_signals()
            .into_iter()
            .filter(|s| s.name() == name)
            .collect()
    }

    pub fn signal_count(&self) -> usize {
        self.published
            .read()
            .expect("InMemorySignalPublisher: published lock poisoned")
            .len()
    }

    pub fn has_signal(&self, name: &str) -> bool {
        self.published
            .read()
            .expect("InMemorySignalPublisher: published lock poisoned")
            .iter()
            .any(|s| s.name() == name)
    }

    pub fn clear(&self) {
        self.published
            .write()
            .expect("InMemorySignalPublisher: published write lock poisoned")
            .clear();
    }
}

impl LocalEventPublisher for InMemorySignalPublisher {
    fn publish(&self, signal: LocalSignal) {
        self.published
            .write()
            .expect("InMemorySignalPublisher: published write lock poisoned")
            .push(signal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn captures_signals_in_order() {
        let publisher = InMemorySignalPublisher::new();
        publisher.publish(LocalSignal::VehicleUpdated(json!({"vehicleId": "veh_1"})));
        publisher.publish(LocalSignal::NewNotification(json!({"title": "Hi"})));

        assert_eq!(publisher.signal_count(), 2);
        assert!(publisher.has_signal("new-notification"));
        assert_eq!(publisher.signals_named("vehicle-updated").len(), 1);
    }

    #[test]
    fn clear_resets_capture() {
        let publisher = InMemorySignalPublisher::new();
        publisher.publish(LocalSignal::VehicleUpdated(json!(null)));
        publisher.clear();
        assert_eq!(publisher.signal_count(), 0);
    }
}
