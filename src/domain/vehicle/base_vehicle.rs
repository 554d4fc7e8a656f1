//! Base vehicle record fetched once per configurator session.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Price, ValidationError, VehicleId, VehicleSlug};

/// Externally supplied vehicle record the configurator prices against.
///
/// # Invariants
///
/// - `brand` and `model` are non-empty
/// - `base_price` is at most [`Price::MAX`]
/// - never mutated after it has been fetched
///
/// The storefront API names the price `cashPrice`; `basePrice` is accepted too.
/// Deserialization goes through [`BaseVehicle::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "BaseVehicleRecord")]
pub struct BaseVehicle {
    id: VehicleId,
    slug: VehicleSlug,
    brand: String,
    model: String,
    base_price: Price,
}

/// Wire shape of a base vehicle before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BaseVehicleRecord {
    id: VehicleId,
    slug: VehicleSlug,
    brand: String,
    model: String,
    #[serde(alias = "cashPrice")]
    base_price: Price,
}

impl TryFrom<BaseVehicleRecord> for BaseVehicle {
    type Error = ValidationError;

    fn try_from(record: BaseVehicleRecord) -> Result<Self, Self::Error> {
        BaseVehicle::new(
            record.id,
            record.slug,
            record.brand,
            record.model,
            record.base_price,
        )
    }
}

impl BaseVehicle {
    /// Creates a base vehicle record.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if brand or model is blank
    /// - `InvalidFormat` if the base price exceeds `Price::MAX`
    pub fn new(
        id: VehicleId,
        slug: VehicleSlug,
        brand: impl Into<String>,
        model: impl Into<String>,
        base_price: Price,
    ) -> Result<Self, ValidationError> {
        let brand = brand.into();
        let model = model.into();
        if brand.trim().is_empty() {
            return Err(ValidationError::empty_field("brand"));
        }
        if model.trim().is_empty() {
            return Err(ValidationError::empty_field("model"));
        }
        if base_price > Price::MAX {
            return Err(ValidationError::invalid_format(
                "base_price",
                format!("exceeds the maximum of {}", Price::MAX.amount()),
            ));
        }
        Ok(Self {
            id,
            slug,
            brand,
            model,
            base_price,
        })
    }

    /// Returns the backend identifier.
    pub fn id(&self) -> &VehicleId {
        &self.id
    }

    /// Returns the URL slug.
    pub fn slug(&self) -> &VehicleSlug {
        &self.slug
    }

    /// Returns the brand.
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Returns the model.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the price before any option surcharges.
    pub fn base_price(&self) -> Price {
        self.base_price
    }

    /// Returns "{brand} {model}".
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }
}
