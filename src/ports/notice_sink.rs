//! Notice and local-signal outputs of the client core.

use crate::domain::realtime::{LocalSignal, Notice};

/// Displays transient notices (toasts) to the user.
pub trait NoticeSink: Send + Sync {
    fn show(&self, notice: Notice);
}

/// Broadcasts signals to the rest of the local application.
///
/// Delivery is best-effort: a signal with no listener is dropped.
pub trait LocalEventPublisher: Send + Sync {
    fn publish(&self, signal: LocalSignal);
}
