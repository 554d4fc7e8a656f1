//! Vehicle records as seen by the storefront.
//!
//! - `BaseVehicle` - the read-only record the configurator prices against
//! - `VehicleSummary`, `Page`, `VehicleQuery` - listing and search results

mod base_vehicle;
mod listing;

pub use base_vehicle::BaseVehicle;
pub use listing::{Page, Pagination, VehicleImage, VehicleQuery, VehicleSummary, PLACEHOLDER_IMAGE};
