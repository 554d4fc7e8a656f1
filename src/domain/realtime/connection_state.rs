//! Realtime connection lifecycle.

use serde::Serialize;

use crate::domain::foundation::StateMachine;

/// Lifecycle of the realtime connection.
///
/// ```text
/// Disconnected ──▶ Connecting ──▶ Connected
///      ▲               │              │
///      └───────────────┴──────────────┘   (failure / close)
///
/// any ──▶ TornDown   (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    TornDown,
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }
}

impl StateMachine for ConnectionState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ConnectionState::*;
        matches!(
            (self, target),
            (Disconnected, Connecting)
                | (Disconnected, TornDown)
                | (Connecting, Connected)
                | (Connecting, Disconnected)
                | (Connecting, TornDown)
                | (Connected, Disconnected)
                | (Connected, TornDown)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ConnectionState::*;
        match self {
            Disconnected => vec![Connecting, TornDown],
            Connecting => vec![Connected, Disconnected, TornDown],
            Connected => vec![Disconnected, TornDown],
            TornDown => vec![],
        }
    }
}
