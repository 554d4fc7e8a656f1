//! The storefront's standard option tables.

use std::sync::Arc;

use once_cell::sync::Lazy;

use super::catalog::{Catalog, ColorOption, OptionCatalogs, OptionEntry, PackageOption};
use crate::domain::foundation::ValidationError;

static STANDARD: Lazy<Arc<OptionCatalogs>> =
    Lazy::new(|| Arc::new(build().expect("standard option catalogs are valid")));

impl OptionCatalogs {
    /// Shared handle to the standard option tables.
    pub fn standard() -> Arc<OptionCatalogs> {
        Arc::clone(&STANDARD)
    }
}

fn build() -> Result<OptionCatalogs, ValidationError> {
    let colors = Catalog::new(
        "colors",
        vec![
            ColorOption::new("Pearl White", "#F8F8FF", 0),
            ColorOption::new("Midnight Black", "#1C1C1C", 0),
            ColorOption::new("Silver Metallic", "#C0C0C0", 0),
            ColorOption::new("Ruby Red", "#9B111E", 15_000),
            ColorOption::new("Deep Blue", "#003087", 15_000),
        ],
    )?;

    let wheels = Catalog::new(
        "wheels",
        vec![
            OptionEntry::new("17\" Standard Alloy", 0),
            OptionEntry::new("18\" Sport Alloy", 25_000),
            OptionEntry::new("19\" Premium Alloy", 45_000),
        ],
    )?;

    let interiors = Catalog::new(
        "interiors",
        vec![
            OptionEntry::new("Black Fabric", 0),
            OptionEntry::new("Beige Leather", 50_000),
            OptionEntry::new("Black Leather", 50_000),
        ],
    )?;

    let packages = Catalog::new(
        "packages",
        vec![
            PackageOption::new(
                "Technology Package",
                75_000,
                &["360° Camera", "Adaptive Cruise", "Lane Keep Assist"],
            ),
            PackageOption::new(
                "Premium Sound System",
                45_000,
                &["10 Speakers", "Subwoofer", "Amplifier"],
            ),
            PackageOption::new(
                "Sunroof Package",
                60_000,
                &["Panoramic Sunroof", "Power Shade"],
            ),
        ],
    )?;

    let accessories = Catalog::new(
        "accessories",
        vec![
            OptionEntry::new("All-Weather Floor Mats", 5_000),
            OptionEntry::new("Cargo Organizer", 3_000),
            OptionEntry::new("Roof Rack", 12_000),
            OptionEntry::new("Tint Package", 8_000),
        ],
    )?;

    OptionCatalogs::new(colors, wheels, interiors, packages, accessories)
}
