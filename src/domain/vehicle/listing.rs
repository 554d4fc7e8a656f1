//! Listing and search result types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Price, VehicleId, VehicleSlug};

/// Image shown when a vehicle has no gallery.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder-car.jpg";

/// Gallery image; older records store a bare URL string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VehicleImage {
    Url(String),
    Detailed {
        #[serde(default)]
        id: Option<String>,
        url: String,
        #[serde(default)]
        alt: Option<String>,
        #[serde(default)]
        order: Option<u32>,
    },
}

impl VehicleImage {
    /// Returns the image URL regardless of representation.
    pub fn url(&self) -> &str {
        match self {
            VehicleImage::Url(url) => url,
            VehicleImage::Detailed { url, .. } => url,
        }
    }
}

/// Vehicle card data returned by listing, search and featured endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSummary {
    pub id: VehicleId,
    pub slug: VehicleSlug,
    pub brand: String,
    pub model: String,
    pub year: u16,
    #[serde(default)]
    pub variant: Option<String>,
    #[serde(default)]
    pub transmission: Option<String>,
    #[serde(default)]
    pub fuel_type: Option<String>,
    #[serde(default, alias = "cashPrice")]
    pub price: Option<Price>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub images: Vec<VehicleImage>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub stock_count: Option<u32>,
}

impl VehicleSummary {
    /// URL of the image at `index`, falling back to the placeholder.
    pub fn image_url(&self, index: usize) -> &str {
        self.images
            .get(index)
            .map(VehicleImage::url)
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// Thumbnail if set, otherwise the first gallery image.
    pub fn card_image(&self) -> &str {
        self.thumbnail_url
            .as_deref()
            .unwrap_or_else(|| self.image_url(0))
    }
}

/// Pagination block of a paginated response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u32,
    pub pages: u32,
}

impl Pagination {
    /// Returns true if a later page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

/// Listing request: page window plus free-form filters (brand, fuelType, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub filters: BTreeMap<String, String>,
}

impl VehicleQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Adds a filter; empty values are skipped.
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.filters.insert(key.into(), value);
        }
        self
    }

    /// Flattens the query into URL query pairs.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.filters.len() + 2);
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs.extend(self.filters.iter().map(|(k, v)| (k.clone(), v.clone())));
        pairs
    }
}
