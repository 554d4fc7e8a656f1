//! Vehicle configurator - option catalogs and price derivation.
//!
//! A `Configurator` starts uninitialized. Once the base vehicle has been
//! fetched, `initialize` picks the first entry of every single-select
//! catalog and from then on every `select_single` / `toggle_multi` keeps
//! the total price equal to the base price plus all selected surcharges.
//!
//! # Module Organization
//!
//! - `catalog` - option entries, catalogs and field enums
//! - `standard` - the storefront's option tables
//! - `configuration` - the `Configurator` state machine
//! - `breakdown` - itemized price summary
//! - `share` - shareable snapshot of a configuration

mod breakdown;
mod catalog;
mod configuration;
mod errors;
mod share;
mod standard;

pub use breakdown::{PriceBreakdown, PriceLine};
pub use catalog::{
    Catalog, ColorOption, MultiSelectField, OptionCatalogs, OptionEntry, PackageOption,
    PricedOption, SingleSelectField,
};
pub use configuration::{Configuration, Configurator};
pub use errors::ConfiguratorError;
pub use share::ShareSummary;
