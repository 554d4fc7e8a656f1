//! Test doubles for the realtime transport port.

mod scripted;

pub use scripted::{ConnectStep, ScriptedTransport};
