//! Realtime transport port - a persistent bidirectional event channel.
//!
//! The notification client drives reconnection itself; a transport only
//! knows how to make one connection attempt and how to talk over it.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Why a connection attempt failed or an established connection dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionFailure {
    /// Could not reach the server.
    #[error("connection refused: {0}")]
    Refused(String),

    /// Server reachable but the handshake was not acknowledged.
    #[error("handshake failed: {0}")]
    Handshake(String),

    /// Established connection was lost.
    #[error("connection lost: {0}")]
    Lost(String),

    /// Peer sent something we could not understand.
    #[error("protocol error: {0}")]
    Protocol(String),
}

/// A named event received from the server.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundMessage {
    pub name: String,
    pub payload: Value,
}

impl InboundMessage {
    pub fn new(name: impl Into<String>, payload: Value) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

/// Factory for connections to one realtime endpoint.
#[async_trait]
pub trait RealtimeTransport: Send + Sync {
    /// Makes a single connection attempt.
    ///
    /// Returns only once the server has acknowledged the connection.
    async fn connect(&self) -> Result<Box<dyn RealtimeConnection>, ConnectionFailure>;
}

/// One established connection.
#[async_trait]
pub trait RealtimeConnection: Send {
    /// Sends a named event. Fire-and-forget: no acknowledgment is awaited.
    async fn emit(&mut self, name: &str, payload: Value) -> Result<(), ConnectionFailure>;

    /// Waits for the next inbound event.
    ///
    /// `None` means the server closed the connection. Must be cancel-safe:
    /// dropping the future between frames loses no event.
    async fn next_event(&mut self) -> Option<Result<InboundMessage, ConnectionFailure>>;

    /// Closes the connection. Best-effort; errors are swallowed.
    async fn close(&mut self);
}
