//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `vehicle` - Vehicle records as served by the storefront API
//! - `configurator` - Option catalogs and configuration pricing
//! - `realtime` - Inbound notification events and connection lifecycle
//! - `leads` - Test-drive, financing and trade-in submissions

pub mod configurator;
pub mod foundation;
pub mod leads;
pub mod realtime;
pub mod vehicle;
