//! Application layer - orchestrates domain operations over ports.
//!
//! - `configurator_session` - loads a vehicle and drives the configurator
//! - `lead_desk` - test-drive, financing and trade-in submissions
//! - `realtime` - reconnecting notification client and its provider

mod configurator_session;
mod lead_desk;
pub mod realtime;

pub use configurator_session::{ConfiguratorSession, SessionView};
pub use lead_desk::{LeadDesk, LeadError};
pub use realtime::{
    NotificationHandle, NotificationProvider, RealtimeClientConfig, RealtimeError,
    RealtimeNotificationClient,
};
