//! Socket.IO v4 text packet codec (Engine.IO v4 framing, default namespace).
//!
//! | Frame | Meaning |
//! |-------|---------|
//! | `0{...}` | Engine.IO open (session parameters) |
//! | `1` | Engine.IO close |
//! | `2` / `3` | ping / pong |
//! | `40` / `40{...}` | namespace connect / ack |
//! | `41` | namespace disconnect |
//! | `42["name", payload]` | event |
//! | `44{...}` | namespace connect error |
//! | `6` | noop |
//!
//! Binary attachments and custom namespaces are not used by the storefront
//! server and are rejected.

use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Session parameters sent by the server in the open packet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenPayload {
    pub sid: String,
    #[serde(default)]
    pub upgrades: Vec<String>,
    pub ping_interval: u64,
    pub ping_timeout: u64,
    #[serde(default)]
    pub max_payload: Option<u64>,
}

impl OpenPayload {
    /// How long the connection may stay silent before it is considered dead.
    pub fn liveness_window(&self) -> Duration {
        Duration::from_millis(self.ping_interval.saturating_add(self.ping_timeout))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    Open(OpenPayload),
    Close,
    Ping,
    Pong,
    Noop,
    /// Connect request from the client (no payload) or ack from the server.
    Connect(Option<Value>),
    Disconnect,
    Event { name: String, payload: Value },
    ConnectError(Value),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("empty packet")]
    Empty,

    #[error("unknown packet type '{0}'")]
    UnknownType(String),

    #[error("unsupported namespace '{0}'")]
    UnsupportedNamespace(String),

    #[error("malformed packet: {0}")]
    Malformed(String),
}

impl Packet {
    pub fn decode(frame: &str) -> Result<Self, CodecError> {
        let mut chars = frame.chars();
        let engine_type = chars.next().ok_or(CodecError::Empty)?;
        let rest = chars.as_str();

        match engine_type {
            '0' => serde_json::from_str(rest)
                .map(Packet::Open)
                .map_err(|e| CodecError::Malformed(e.to_string())),
            '1' => Ok(Packet::Close),
            '2' => Ok(Packet::Ping),
            '3' => Ok(Packet::Pong),
            '6' => Ok(Packet::Noop),
            '4' => Self::decode_socket(rest),
            other => Err(CodecError::UnknownType(other.to_string())),
        }
    }

    fn decode_socket(packet: &str) -> Result<Self, CodecError> {
        let mut chars = packet.chars();
        let socket_type = chars.next().ok_or(CodecError::Empty)?;
        let body = chars.as_str();

        if body.starts_with('/') {
            let namespace = body.split(',').next().unwrap_or(body);
            return Err(CodecError::UnsupportedNamespace(namespace.to_string()));
        }

        match socket_type {
            '0' => {
                if body.is_empty() {
                    Ok(Packet::Connect(None))
                } else {
                    serde_json::from_str(body)
                        .map(|v| Packet::Connect(Some(v)))
                        .map_err(|e| CodecError::Malformed(e.to_string()))
                }
            }
            '1' => Ok(Packet::Disconnect),
            '2' => Self::decode_event(body),
            '4' => serde_json::from_str(body)
                .map(Packet::ConnectError)
                .map_err(|e| CodecError::Malformed(e.to_string())),
            other => Err(CodecError::UnknownType(format!("4{}", other))),
        }
    }

    fn decode_event(body: &str) -> Result<Self, CodecError> {
        // Optional ack id precedes the argument array.
        let args = body.trim_start_matches(|c: char| c.is_ascii_digit());
        let values: Vec<Value> =
            serde_json::from_str(args).map_err(|e| CodecError::Malformed(e.to_string()))?;

        let mut values = values.into_iter();
        let name = match values.next() {
            Some(Value::String(name)) => name,
            _ => return Err(CodecError::Malformed("event name missing".to_string())),
        };
        let payload = values.next().unwrap_or(Value::Null);
        Ok(Packet::Event { name, payload })
    }

    pub fn encode(&self) -> String {
        match self {
            Packet::Open(_) => "0".to_string(),
            Packet::Close => "1".to_string(),
            Packet::Ping => "2".to_string(),
            Packet::Pong => "3".to_string(),
            Packet::Noop => "6".to_string(),
            Packet::Connect(None) => "40".to_string(),
            Packet::Connect(Some(auth)) => format!("40{}", auth),
            Packet::Disconnect => "41".to_string(),
            Packet::Event { name, payload } => {
                format!("42{}", Value::Array(vec![Value::String(name.clone()), payload.clone()]))
            }
            Packet::ConnectError(data) => format!("44{}", data),
        }
    }
}
