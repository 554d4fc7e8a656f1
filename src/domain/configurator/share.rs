//! Shareable snapshot of a configuration.

use serde::Serialize;
use url::Url;

use super::configuration::Configurator;
use super::errors::ConfiguratorError;
use crate::domain::foundation::Price;

/// What gets handed to a clipboard or native share sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareSummary {
    pub title: String,
    pub url: Url,
    pub color: String,
    pub wheels: String,
    pub interior: String,
    pub packages: Vec<String>,
    pub accessories: Vec<String>,
    pub total_price: Price,
}

impl ShareSummary {
    /// Plain-text body for sinks that cannot carry a title.
    pub fn to_text(&self) -> String {
        let mut text = format!(
            "{}\nColor: {}\nWheels: {}\nInterior: {}",
            self.title, self.color, self.wheels, self.interior
        );
        if !self.packages.is_empty() {
            text.push_str(&format!("\nPackages: {}", self.packages.join(", ")));
        }
        if !self.accessories.is_empty() {
            text.push_str(&format!("\nAccessories: {}", self.accessories.join(", ")));
        }
        text.push_str(&format!("\nTotal: {}\n{}", self.total_price, self.url));
        text
    }
}

impl Configurator {
    /// Snapshots the current selection as a link under `storefront_url`.
    ///
    /// The link is `{storefront}/configurator/{slug}` with one query pair per
    /// selection, so opening it reproduces the configuration.
    pub fn share(&self, storefront_url: &Url) -> Result<ShareSummary, ConfiguratorError> {
        let config = self.configuration()?;
        let vehicle = config.base_vehicle();

        let mut url = storefront_url.clone();
        let path = format!(
            "{}/configurator/{}",
            storefront_url.path().trim_end_matches('/'),
            vehicle.slug()
        );
        url.set_path(&path);
        url.set_fragment(None);
        {
            let mut query = url.query_pairs_mut();
            query.clear();
            query.append_pair("color", config.color());
            query.append_pair("wheels", config.wheels());
            query.append_pair("interior", config.interior());
            for name in config.packages() {
                query.append_pair("package", name);
            }
            for name in config.accessories() {
                query.append_pair("accessory", name);
            }
        }

        Ok(ShareSummary {
            title: format!("My Custom {}", vehicle.display_name()),
            url,
            color: config.color().to_string(),
            wheels: config.wheels().to_string(),
            interior: config.interior().to_string(),
            packages: config.packages().iter().cloned().collect(),
            accessories: config.accessories().iter().cloned().collect(),
            total_price: config.total_price(),
        })
    }
}
