//! Price summary line items.

use serde::Serialize;

use super::catalog::{MultiSelectField, SingleSelectField};
use super::configuration::Configurator;
use super::errors::ConfiguratorError;
use crate::domain::foundation::Price;

/// One priced selection in the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceLine {
    pub category: &'static str,
    pub name: String,
    pub price: Price,
}

/// Base price plus one line per selected option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub base_price: Price,
    pub lines: Vec<PriceLine>,
    pub total_price: Price,
}

impl PriceBreakdown {
    /// Sum of option surcharges only.
    pub fn options_total(&self) -> Price {
        self.lines.iter().map(|line| line.price).sum()
    }

    /// Lines with a non-zero surcharge.
    pub fn chargeable_lines(&self) -> impl Iterator<Item = &PriceLine> {
        self.lines.iter().filter(|line| !line.price.is_zero())
    }
}

impl Configurator {
    /// Itemizes the current total.
    pub fn breakdown(&self) -> Result<PriceBreakdown, ConfiguratorError> {
        let config = self.configuration()?;
        let catalogs = self.catalogs();
        let mut lines = Vec::new();

        for field in SingleSelectField::ALL {
            let name = config.single(field);
            if let Some(price) = catalogs.single_price(field, name) {
                lines.push(PriceLine {
                    category: field.as_str(),
                    name: name.to_string(),
                    price,
                });
            }
        }

        for field in MultiSelectField::ALL {
            for name in config.multi(field) {
                if let Some(price) = catalogs.multi_price(field, name) {
                    lines.push(PriceLine {
                        category: field.as_str(),
                        name: name.clone(),
                        price,
                    });
                }
            }
        }

        Ok(PriceBreakdown {
            base_price: config.base_vehicle().base_price(),
            lines,
            total_price: config.total_price(),
        })
    }
}
