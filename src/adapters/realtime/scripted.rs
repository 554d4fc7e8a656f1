//! Scripted realtime transport for testing.
//!
//! Connection attempts follow a script (accept / refuse); once the script is
//! used up, the fallback step applies to every further attempt. Tests push
//! inbound events into the live connection and inspect what the client
//! emitted.
//!
//! # Example
//!
//! ```ignore
//! let transport = ScriptedTransport::new().then_accept();
//! // ... open the client and wait for Connected ...
//! transport.push_event("inventory-update", json!({"type": "LOW_STOCK", "stockCount": 2}));
//! assert_eq!(transport.emitted_names(), vec!["join-user"]);
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;

use crate::ports::{ConnectionFailure, InboundMessage, RealtimeConnection, RealtimeTransport};

/// Outcome of one connection attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectStep {
    Accept,
    Refuse,
}

enum ServerFrame {
    Event(InboundMessage),
    Fail(ConnectionFailure),
}

#[derive(Default)]
struct ScriptState {
    script: VecDeque<ConnectStep>,
    fallback: Option<ConnectStep>,
    attempts: u32,
    emitted: Vec<(String, Value)>,
    closed: u32,
    live: Option<mpsc::UnboundedSender<ServerFrame>>,
}

/// Transport double whose connection attempts follow a script.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedTransport {
    /// Every attempt is refused until steps are scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every attempt is accepted.
    pub fn always_accept() -> Self {
        Self::new().otherwise(ConnectStep::Accept)
    }

    /// Every attempt is refused.
    pub fn always_refuse() -> Self {
        Self::new().otherwise(ConnectStep::Refuse)
    }

    pub fn then_accept(self) -> Self {
        self.lock().script.push_back(ConnectStep::Accept);
        self
    }

    pub fn then_refuse(self) -> Self {
        self.lock().script.push_back(ConnectStep::Refuse);
        self
    }

    /// Step used once the script is exhausted (default: refuse).
    pub fn otherwise(self, step: ConnectStep) -> Self {
        self.lock().fallback = Some(step);
        self
    }

    fn lock(&self) -> MutexGuard<'_, ScriptState> {
        self.state.lock().expect("ScriptedTransport: lock poisoned")
    }

    // === Test Helpers ===

    pub fn attempts(&self) -> u32 {
        self.lock().attempts
    }

    pub fn emitted(&self) -> Vec<(String, Value)> {
        self.lock().emitted.clone()
    }

    pub fn emitted_names(&self) -> Vec<String> {
        self.lock().emitted.iter().map(|(n, _)| n.clone()).collect()
    }

    /// Times the client closed a connection.
    pub fn closed(&self) -> u32 {
        self.lock().closed
    }

    pub fn has_live_connection(&self) -> bool {
        self.lock().live.as_ref().is_some_and(|tx| !tx.is_closed())
    }

    /// Delivers an event on the live connection. False if none is live.
    pub fn push_event(&self, name: &str, payload: Value) -> bool {
        self.send(ServerFrame::Event(InboundMessage::new(name, payload)))
    }

    /// Breaks the live connection with an error.
    pub fn fail_connection(&self, reason: &str) -> bool {
        self.send(ServerFrame::Fail(ConnectionFailure::Lost(reason.to_string())))
    }

    /// Server-side close of the live connection.
    pub fn drop_connection(&self) -> bool {
        self.lock().live.take().is_some()
    }

    fn send(&self, frame: ServerFrame) -> bool {
        self.lock()
            .live
            .as_ref()
            .is_some_and(|tx| tx.send(frame).is_ok())
    }
}

#[async_trait]
impl RealtimeTransport for ScriptedTransport {
    async fn connect(&self) -> Result<Box<dyn RealtimeConnection>, ConnectionFailure> {
        let mut state = self.lock();
        state.attempts += 1;
        let step = state
            .script
            .pop_front()
            .or_else(|| state.fallback.clone())
            .unwrap_or(ConnectStep::Refuse);

        match step {
            ConnectStep::Refuse => Err(ConnectionFailure::Refused(format!(
                "scripted refusal #{}",
                state.attempts
            ))),
            ConnectStep::Accept => {
                let (tx, rx) = mpsc::unbounded_channel();
                state.live = Some(tx);
                Ok(Box::new(ScriptedConnection {
                    inbound: rx,
                    state: Arc::clone(&self.state),
                }))
            }
        }
    }
}

struct ScriptedConnection {
    inbound: mpsc::UnboundedReceiver<ServerFrame>,
    state: Arc<Mutex<ScriptState>>,
}

#[async_trait]
impl RealtimeConnection for ScriptedConnection {
    async fn emit(&mut self, name: &str, payload: Value) -> Result<(), ConnectionFailure> {
        self.state
            .lock()
            .expect("ScriptedTransport: lock poisoned")
            .emitted
            .push((name.to_string(), payload));
        Ok(())
    }

    async fn next_event(&mut self) -> Option<Result<InboundMessage, ConnectionFailure>> {
        match self.inbound.recv().await? {
            ServerFrame::Event(message) => Some(Ok(message)),
            ServerFrame::Fail(failure) => Some(Err(failure)),
        }
    }

    async fn close(&mut self) {
        self.inbound.close();
        let mut state = self.state.lock().expect("ScriptedTransport: lock poisoned");
        state.closed += 1;
        state.live = None;
    }
}
