//! Customer leads submitted from the storefront.
//!
//! Field values travel as the form captured them (strings), except for the
//! trade-in checkboxes. `validate` only checks the fields the forms mark as
//! required; everything else is the backend's call.

mod financing;
mod test_drive;
mod trade_in;

pub use financing::{FinancingApplication, DEFAULT_LOAN_TERM_MONTHS};
pub use test_drive::{TestDriveRequest, DEFAULT_LOCATION, TIME_SLOTS};
pub use trade_in::TradeInSubmission;

use serde::Deserialize;

use crate::domain::foundation::ValidationError;

/// Backend acknowledgement of a submitted lead.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LeadReceipt {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

pub(crate) fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(())
}

pub(crate) fn require_email(field: &'static str, value: &str) -> Result<(), ValidationError> {
    require(field, value)?;
    let (local, domain) = value
        .trim()
        .split_once('@')
        .ok_or_else(|| ValidationError::invalid_format(field, "missing '@'"))?;
    if local.is_empty() || !domain.contains('.') {
        return Err(ValidationError::invalid_format(field, "not an email address"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_whitespace() {
        assert_eq!(
            require("firstName", "  "),
            Err(ValidationError::empty_field("firstName"))
        );
        assert!(require("firstName", "Ana").is_ok());
    }

    #[test]
    fn require_email_checks_shape() {
        assert!(require_email("email", "ana@example.ph").is_ok());
        assert!(require_email("email", "ana.example.ph").is_err());
        assert!(require_email("email", "@example.ph").is_err());
        assert!(require_email("email", "ana@localhost").is_err());
    }

    #[test]
    fn receipt_message_is_optional() {
        let receipt: LeadReceipt = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(receipt.success);
        assert!(receipt.message.is_none());
    }
}
