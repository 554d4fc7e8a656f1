//! VehicleReader port for storefront catalogue queries

use async_trait::async_trait;

use super::ApiError;
use crate::domain::foundation::VehicleSlug;
use crate::domain::vehicle::{BaseVehicle, Page, VehicleQuery, VehicleSummary};

/// Read-only access to the vehicle catalogue.
#[async_trait]
pub trait VehicleReader: Send + Sync {
    /// Fetch a single vehicle by slug.
    ///
    /// `Ok(None)` when the backend answers but reports no such vehicle.
    async fn get_by_slug(&self, slug: &VehicleSlug) -> Result<Option<BaseVehicle>, ApiError>;

    /// Paginated listing with optional filters
    async fn list(&self, query: &VehicleQuery) -> Result<Page<VehicleSummary>, ApiError>;

    /// Free-text search
    async fn search(
        &self,
        term: &str,
        page: u32,
        limit: u32,
    ) -> Result<Page<VehicleSummary>, ApiError>;

    /// Featured vehicles for the home page
    async fn featured(&self, limit: u32) -> Result<Vec<VehicleSummary>, ApiError>;
}
