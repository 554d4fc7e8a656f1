//! Realtime notification client and its provider.

mod client;
mod provider;

pub use client::{RealtimeClientConfig, RealtimeError, RealtimeNotificationClient};
pub use provider::{NotificationHandle, NotificationProvider};
