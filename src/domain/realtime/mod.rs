//! Realtime notifications - inbound events, dispatch, connection lifecycle.

mod connection_state;
mod dispatch;
pub mod events;
mod notice;
mod reconnect;
mod signals;

pub use connection_state::ConnectionState;
pub use dispatch::{dispatch, Effect};
pub use events::{AnnouncedVehicle, EventDecodeError, NotificationEvent, OutboundEvent};
pub use notice::{Notice, NoticeVariant};
pub use reconnect::{Backoff, ReconnectPolicy, ReconnectSchedule};
pub use signals::LocalSignal;
