//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storefront API Ports
//!
//! - `VehicleReader` - Vehicle catalogue queries
//! - `LeadGateway` - Test-drive, financing and trade-in submissions
//!
//! ## Realtime Ports
//!
//! - `RealtimeTransport` / `RealtimeConnection` - Persistent event channel
//!
//! ## Output Ports
//!
//! - `NoticeSink` - Transient user notices
//! - `LocalEventPublisher` - In-process broadcast signals
//! - `ShareSink` - Platform share / clipboard

mod api_error;
mod lead_gateway;
mod notice_sink;
mod realtime_transport;
mod share_sink;
mod vehicle_reader;

pub use api_error::ApiError;
pub use lead_gateway::LeadGateway;
pub use notice_sink::{LocalEventPublisher, NoticeSink};
pub use realtime_transport::{
    ConnectionFailure, InboundMessage, RealtimeConnection, RealtimeTransport,
};
pub use share_sink::{ShareError, ShareOutcome, ShareSink};
pub use vehicle_reader::VehicleReader;
