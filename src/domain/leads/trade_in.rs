use serde::Serialize;

use super::{require, require_email};
use crate::domain::foundation::ValidationError;

/// `POST /api/trade-ins` body. A customer's vehicle offered for sale or trade.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeInSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub brand: String,
    pub model: String,
    pub year: String,
    pub variant: String,
    pub mileage: String,
    pub transmission: String,
    pub fuel_type: String,
    pub color: String,
    pub condition: String,
    pub has_accidents: bool,
    pub service_history: bool,
    pub description: String,
    pub expected_price: String,
}

impl TradeInSubmission {
    /// Oldest model year the form offers, relative to `current_year`.
    pub fn oldest_year(current_year: i32) -> i32 {
        current_year - 29
    }

    pub fn validate(&self, current_year: i32) -> Result<(), ValidationError> {
        require("firstName", &self.first_name)?;
        require("lastName", &self.last_name)?;
        require_email("email", &self.email)?;
        require("phone", &self.phone)?;
        require("brand", &self.brand)?;
        require("model", &self.model)?;
        require("year", &self.year)?;
        let year: i32 = self
            .year
            .trim()
            .parse()
            .map_err(|_| ValidationError::invalid_format("year", "not a number"))?;
        if year < Self::oldest_year(current_year) || year > current_year {
            return Err(ValidationError::invalid_format(
                "year",
                format!("{} is outside the accepted range", year),
            ));
        }
        require("mileage", &self.mileage)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> TradeInSubmission {
        TradeInSubmission {
            first_name: "Ben".to_string(),
            last_name: "Cruz".to_string(),
            email: "ben@example.ph".to_string(),
            phone: "09181234567".to_string(),
            brand: "Honda".to_string(),
            model: "City".to_string(),
            year: "2018".to_string(),
            mileage: "64000".to_string(),
            has_accidents: false,
            service_history: true,
            ..TradeInSubmission::default()
        }
    }

    #[test]
    fn accepts_year_in_range() {
        assert!(submission().validate(2026).is_ok());
    }

    #[test]
    fn rejects_future_and_too_old_years() {
        let mut s = submission();
        s.year = "2027".to_string();
        assert!(s.validate(2026).is_err());
        s.year = "1996".to_string();
        assert!(s.validate(2026).is_err());
        s.year = "1997".to_string();
        assert!(s.validate(2026).is_ok());
    }

    #[test]
    fn flags_serialize_as_booleans() {
        let json = serde_json::to_value(submission()).unwrap();
        assert_eq!(json["serviceHistory"], true);
        assert_eq!(json["hasAccidents"], false);
        assert_eq!(json["fuelType"], "");
    }
}
