//! Process-wide broadcast of local signals over `tokio::sync::broadcast`.

use tokio::sync::broadcast;

use crate::domain::realtime::LocalSignal;
use crate::ports::LocalEventPublisher;

/// Fan-out of `LocalSignal`s to any number of in-process listeners.
///
/// Slow listeners lag and lose the oldest signals rather than blocking the
/// realtime loop.
#[derive(Debug, Clone)]
pub struct LocalEventBus {
    sender: broadcast::Sender<LocalSignal>,
}

impl LocalEventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LocalSignal> {
        self.sender.subscribe()
    }

    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl LocalEventPublisher for LocalEventBus {
    fn publish(&self, signal: LocalSignal) {
        let name = signal.name();
        match self.sender.send(signal) {
            Ok(listeners) => tracing::debug!(signal = name, listeners, "Local signal published"),
            Err(_) => tracing::trace!(signal = name, "Local signal dropped, no listeners"),
        }
    }
}
