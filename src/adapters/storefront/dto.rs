//! Response envelopes of the storefront REST API.

use serde::Deserialize;

use crate::domain::vehicle::Pagination;

/// `{ success, data, message }` wrapper around single-record responses.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `{ success, data: [...], pagination }` wrapper around listings.
#[derive(Debug, Deserialize)]
pub struct ListEnvelope<T> {
    pub success: bool,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of a non-2xx response.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
