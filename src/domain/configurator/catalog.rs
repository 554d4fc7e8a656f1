//! Option catalogs the configurator selects from.
//!
//! Every catalog entry has a unique name and a non-negative surcharge.
//! Colors additionally carry a hex display token; packages carry an
//! ordered list of feature descriptions that never affect the price.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Price, ValidationError};

/// Anything the configurator can price by name.
pub trait PricedOption {
    /// Name, unique within its catalog.
    fn name(&self) -> &str;

    /// Additive surcharge.
    fn price(&self) -> Price;
}

/// Plain catalog entry (wheels, interiors, accessories).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionEntry {
    pub name: String,
    pub price: Price,
}

impl OptionEntry {
    pub fn new(name: impl Into<String>, price: u64) -> Self {
        Self {
            name: name.into(),
            price: Price::new(price),
        }
    }
}

impl PricedOption for OptionEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn price(&self) -> Price {
        self.price
    }
}

/// Paint color with the swatch shown in the preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorOption {
    pub name: String,
    pub hex: String,
    pub price: Price,
}

impl ColorOption {
    pub fn new(name: impl Into<String>, hex: impl Into<String>, price: u64) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
            price: Price::new(price),
        }
    }
}

impl PricedOption for ColorOption {
    fn name(&self) -> &str {
        &self.name
    }

    fn price(&self) -> Price {
        self.price
    }
}

/// Option package with its display-only feature list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageOption {
    pub name: String,
    pub price: Price,
    pub features: Vec<String>,
}

impl PackageOption {
    pub fn new(name: impl Into<String>, price: u64, features: &[&str]) -> Self {
        Self {
            name: name.into(),
            price: Price::new(price),
            features: features.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl PricedOption for PackageOption {
    fn name(&self) -> &str {
        &self.name
    }

    fn price(&self) -> Price {
        self.price
    }
}

/// Ordered catalog with unique, non-blank names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog<T> {
    entries: Vec<T>,
}

impl<T: PricedOption> Catalog<T> {
    /// Builds a catalog, validating names.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if an entry name is blank
    /// - `Duplicate` if two entries share a name
    pub fn new(field: &str, entries: Vec<T>) -> Result<Self, ValidationError> {
        {
            let mut seen = HashSet::with_capacity(entries.len());
            for entry in &entries {
                if entry.name().trim().is_empty() {
                    return Err(ValidationError::empty_field(format!("{}.name", field)));
                }
                if !seen.insert(entry.name()) {
                    return Err(ValidationError::duplicate(field, entry.name()));
                }
            }
        }
        Ok(Self { entries })
    }

    /// Looks up an entry by exact name.
    pub fn find(&self, name: &str) -> Option<&T> {
        self.entries.iter().find(|e| e.name() == name)
    }

    /// Returns true if the catalog offers `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Surcharge of `name`, if offered.
    pub fn price_of(&self, name: &str) -> Option<Price> {
        self.find(name).map(PricedOption::price)
    }

    /// The default pick for single-select catalogs.
    pub fn first(&self) -> Option<&T> {
        self.entries.first()
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Single-select configuration fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SingleSelectField {
    Color,
    Wheels,
    Interior,
}

impl SingleSelectField {
    pub const ALL: [SingleSelectField; 3] = [
        SingleSelectField::Color,
        SingleSelectField::Wheels,
        SingleSelectField::Interior,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SingleSelectField::Color => "color",
            SingleSelectField::Wheels => "wheels",
            SingleSelectField::Interior => "interior",
        }
    }
}

impl fmt::Display for SingleSelectField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Multi-select configuration fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiSelectField {
    Packages,
    Accessories,
}

impl MultiSelectField {
    pub const ALL: [MultiSelectField; 2] = [MultiSelectField::Packages, MultiSelectField::Accessories];

    pub fn as_str(&self) -> &'static str {
        match self {
            MultiSelectField::Packages => "packages",
            MultiSelectField::Accessories => "accessories",
        }
    }
}

impl fmt::Display for MultiSelectField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five catalogs offered for one configurator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionCatalogs {
    colors: Catalog<ColorOption>,
    wheels: Catalog<OptionEntry>,
    interiors: Catalog<OptionEntry>,
    packages: Catalog<PackageOption>,
    accessories: Catalog<OptionEntry>,
}

impl OptionCatalogs {
    /// Bundles catalogs.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if a single-select catalog has no entries
    pub fn new(
        colors: Catalog<ColorOption>,
        wheels: Catalog<OptionEntry>,
        interiors: Catalog<OptionEntry>,
        packages: Catalog<PackageOption>,
        accessories: Catalog<OptionEntry>,
    ) -> Result<Self, ValidationError> {
        if colors.is_empty() {
            return Err(ValidationError::empty_field("colors"));
        }
        if wheels.is_empty() {
            return Err(ValidationError::empty_field("wheels"));
        }
        if interiors.is_empty() {
            return Err(ValidationError::empty_field("interiors"));
        }
        Ok(Self {
            colors,
            wheels,
            interiors,
            packages,
            accessories,
        })
    }

    pub fn colors(&self) -> &Catalog<ColorOption> {
        &self.colors
    }

    pub fn wheels(&self) -> &Catalog<OptionEntry> {
        &self.wheels
    }

    pub fn interiors(&self) -> &Catalog<OptionEntry> {
        &self.interiors
    }

    pub fn packages(&self) -> &Catalog<PackageOption> {
        &self.packages
    }

    pub fn accessories(&self) -> &Catalog<OptionEntry> {
        &self.accessories
    }

    /// Surcharge of a single-select option, if offered.
    pub fn single_price(&self, field: SingleSelectField, name: &str) -> Option<Price> {
        match field {
            SingleSelectField::Color => self.colors.price_of(name),
            SingleSelectField::Wheels => self.wheels.price_of(name),
            SingleSelectField::Interior => self.interiors.price_of(name),
        }
    }

    /// Surcharge of a multi-select option, if offered.
    pub fn multi_price(&self, field: MultiSelectField, name: &str) -> Option<Price> {
        match field {
            MultiSelectField::Packages => self.packages.price_of(name),
            MultiSelectField::Accessories => self.accessories.price_of(name),
        }
    }

    /// Default name for a single-select field (the catalog's first entry).
    pub fn default_single(&self, field: SingleSelectField) -> &str {
        // Single-select catalogs are non-empty by construction.
        let first = match field {
            SingleSelectField::Color => self.colors.first().map(PricedOption::name),
            SingleSelectField::Wheels => self.wheels.first().map(PricedOption::name),
            SingleSelectField::Interior => self.interiors.first().map(PricedOption::name),
        };
        first.unwrap_or_default()
    }

    /// All names offered for a single-select field, in catalog order.
    pub fn single_names(&self, field: SingleSelectField) -> Vec<&str> {
        match field {
            SingleSelectField::Color => self.colors.entries().iter().map(|e| e.name()).collect(),
            SingleSelectField::Wheels => self.wheels.entries().iter().map(|e| e.name()).collect(),
            SingleSelectField::Interior => {
                self.interiors.entries().iter().map(|e| e.name()).collect()
            }
        }
    }

    /// All names offered for a multi-select field, in catalog order.
    pub fn multi_names(&self, field: MultiSelectField) -> Vec<&str> {
        match field {
            MultiSelectField::Packages => {
                self.packages.entries().iter().map(|e| e.name()).collect()
            }
            MultiSelectField::Accessories => {
                self.accessories.entries().iter().map(|e| e.name()).collect()
            }
        }
    }
}
