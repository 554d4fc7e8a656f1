//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storefront` - REST client for the storefront backend
//! - `socketio` - Realtime channel over Socket.IO / WebSocket
//! - `events` - Local signal publishers (broadcast, in-memory)
//! - `notices` - Notice sinks (log, recording)
//! - `share` - Share sinks (log, recording)
//! - `realtime` - Scripted transport for tests

pub mod events;
pub mod notices;
pub mod realtime;
pub mod share;
pub mod socketio;
pub mod storefront;

pub use events::{InMemorySignalPublisher, LocalEventBus};
pub use notices::{LogNoticeSink, RecordingNoticeSink};
pub use realtime::{ConnectStep, ScriptedTransport};
pub use share::{LogShareSink, RecordingShareSink};
pub use socketio::SocketIoTransport;
pub use storefront::{StorefrontClient, StorefrontClientConfig};
