//! Socket.IO adapter for the realtime notification channel.
//!
//! # Components
//!
//! - [`codec`] - Engine.IO / Socket.IO text packet encoding
//! - [`transport`] - `RealtimeTransport` over a tokio-tungstenite WebSocket

pub mod codec;
pub mod transport;

pub use codec::{CodecError, OpenPayload, Packet};
pub use transport::{SocketIoConnection, SocketIoTransport};
