//! Configurator aggregate.
//!
//! Holds the customer's option selection for one base vehicle and keeps the
//! total price in step with it. The total is recomputed eagerly inside every
//! mutator, so any read after a mutator returns observes the new total.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;

use super::catalog::{ColorOption, MultiSelectField, OptionCatalogs, SingleSelectField};
use super::errors::ConfiguratorError;
use crate::domain::foundation::Price;
use crate::domain::vehicle::BaseVehicle;

/// Current selection for an initialized configurator.
///
/// # Invariants
///
/// - `color`, `wheels`, `interior` always name an entry of their catalog
/// - `packages` and `accessories` only hold names offered by their catalog
/// - `total_price == base + Σ selected surcharges`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    #[serde(skip)]
    base_vehicle: BaseVehicle,
    color: String,
    wheels: String,
    interior: String,
    packages: BTreeSet<String>,
    accessories: BTreeSet<String>,
    total_price: Price,
}

impl Configuration {
    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the vehicle being configured.
    pub fn base_vehicle(&self) -> &BaseVehicle {
        &self.base_vehicle
    }

    /// Returns the selected name for a single-select field.
    pub fn single(&self, field: SingleSelectField) -> &str {
        match field {
            SingleSelectField::Color => &self.color,
            SingleSelectField::Wheels => &self.wheels,
            SingleSelectField::Interior => &self.interior,
        }
    }

    /// Returns the selected set for a multi-select field.
    pub fn multi(&self, field: MultiSelectField) -> &BTreeSet<String> {
        match field {
            MultiSelectField::Packages => &self.packages,
            MultiSelectField::Accessories => &self.accessories,
        }
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn wheels(&self) -> &str {
        &self.wheels
    }

    pub fn interior(&self) -> &str {
        &self.interior
    }

    pub fn packages(&self) -> &BTreeSet<String> {
        &self.packages
    }

    pub fn accessories(&self) -> &BTreeSet<String> {
        &self.accessories
    }

    /// Returns the total price maintained by the last mutation.
    pub fn total_price(&self) -> Price {
        self.total_price
    }

    fn single_mut(&mut self, field: SingleSelectField) -> &mut String {
        match field {
            SingleSelectField::Color => &mut self.color,
            SingleSelectField::Wheels => &mut self.wheels,
            SingleSelectField::Interior => &mut self.interior,
        }
    }

    fn multi_mut(&mut self, field: MultiSelectField) -> &mut BTreeSet<String> {
        match field {
            MultiSelectField::Packages => &mut self.packages,
            MultiSelectField::Accessories => &mut self.accessories,
        }
    }

    fn recompute(&mut self, catalogs: &OptionCatalogs) {
        self.total_price = price_of(self, catalogs);
    }
}

/// Sums the base price and every selected surcharge.
pub(crate) fn price_of(config: &Configuration, catalogs: &OptionCatalogs) -> Price {
    let singles = SingleSelectField::ALL
        .iter()
        .filter_map(|&field| catalogs.single_price(field, config.single(field)));

    let multis = MultiSelectField::ALL.iter().flat_map(|&field| {
        config
            .multi(field)
            .iter()
            .filter_map(move |name| catalogs.multi_price(field, name))
    });

    config.base_vehicle.base_price() + singles.chain(multis).sum::<Price>()
}

/// Configurator state machine: uninitialized until a base vehicle loads.
#[derive(Debug, Clone)]
pub struct Configurator {
    catalogs: Arc<OptionCatalogs>,
    state: Option<Configuration>,
}

impl Configurator {
    /// Creates an uninitialized configurator over the given catalogs.
    pub fn new(catalogs: Arc<OptionCatalogs>) -> Self {
        Self {
            catalogs,
            state: None,
        }
    }

    /// Creates an uninitialized configurator over the standard option tables.
    pub fn standard() -> Self {
        Self::new(OptionCatalogs::standard())
    }

    pub fn catalogs(&self) -> &OptionCatalogs {
        &self.catalogs
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Starts (or restarts) a configuration for `base_vehicle`.
    ///
    /// Every single-select field takes its catalog's first entry and both
    /// multi-select sets are cleared.
    pub fn initialize(&mut self, base_vehicle: BaseVehicle) -> &Configuration {
        let catalogs = &self.catalogs;
        let mut config = Configuration {
            base_vehicle,
            color: catalogs.default_single(SingleSelectField::Color).to_string(),
            wheels: catalogs.default_single(SingleSelectField::Wheels).to_string(),
            interior: catalogs.default_single(SingleSelectField::Interior).to_string(),
            packages: BTreeSet::new(),
            accessories: BTreeSet::new(),
            total_price: Price::ZERO,
        };
        config.recompute(catalogs);

        tracing::debug!(
            vehicle = %config.base_vehicle.slug(),
            total = config.total_price.amount(),
            "configuration initialized"
        );

        self.state.insert(config)
    }

    /// Drops the current configuration; every operation reports
    /// `Uninitialized` until the next `initialize`.
    pub fn reset(&mut self) {
        self.state = None;
    }

    /// Replaces a single-select field and returns the new total.
    ///
    /// # Errors
    ///
    /// - `Uninitialized` before `initialize`
    /// - `UnknownOption` if `name` is not in the field's catalog
    pub fn select_single(
        &mut self,
        field: SingleSelectField,
        name: &str,
    ) -> Result<Price, ConfiguratorError> {
        let config = self.state.as_mut().ok_or(ConfiguratorError::Uninitialized)?;
        if self.catalogs.single_price(field, name).is_none() {
            return Err(ConfiguratorError::unknown_option(field.as_str(), name));
        }

        *config.single_mut(field) = name.to_string();
        config.recompute(&self.catalogs);
        Ok(config.total_price)
    }

    /// Flips membership of `name` in a multi-select set and returns the new total.
    ///
    /// # Errors
    ///
    /// - `Uninitialized` before `initialize`
    /// - `UnknownOption` if `name` is not in the field's catalog
    pub fn toggle_multi(
        &mut self,
        field: MultiSelectField,
        name: &str,
    ) -> Result<Price, ConfiguratorError> {
        let config = self.state.as_mut().ok_or(ConfiguratorError::Uninitialized)?;
        if self.catalogs.multi_price(field, name).is_none() {
            return Err(ConfiguratorError::unknown_option(field.as_str(), name));
        }

        let set = config.multi_mut(field);
        if !set.remove(name) {
            set.insert(name.to_string());
        }
        config.recompute(&self.catalogs);
        Ok(config.total_price)
    }

    /// Returns the current total without recomputing it.
    pub fn current_total(&self) -> Result<Price, ConfiguratorError> {
        self.configuration().map(Configuration::total_price)
    }

    /// Returns the current selection.
    pub fn configuration(&self) -> Result<&Configuration, ConfiguratorError> {
        self.state.as_ref().ok_or(ConfiguratorError::Uninitialized)
    }

    /// Returns the selected color entry (name, swatch, surcharge).
    pub fn selected_color(&self) -> Result<&ColorOption, ConfiguratorError> {
        let config = self.configuration()?;
        self.catalogs
            .colors()
            .find(config.color())
            .ok_or_else(|| ConfiguratorError::unknown_option("color", config.color()))
    }
}
