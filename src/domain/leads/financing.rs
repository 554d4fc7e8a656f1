use serde::Serialize;

use super::{require, require_email};
use crate::domain::foundation::ValidationError;

pub const DEFAULT_LOAN_TERM_MONTHS: &str = "36";

/// `POST /api/financing` body. In-house financing application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancingApplication {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: String,
    pub civil_status: String,
    pub address: String,
    pub employment_status: String,
    pub monthly_income: String,
    pub employer: String,
    pub years_employed: String,
    pub vehicle_id: String,
    pub vehicle_name: String,
    pub down_payment: String,
    pub loan_term: String,
}

impl Default for FinancingApplication {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            middle_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            birth_date: String::new(),
            civil_status: String::new(),
            address: String::new(),
            employment_status: String::new(),
            monthly_income: String::new(),
            employer: String::new(),
            years_employed: String::new(),
            vehicle_id: String::new(),
            vehicle_name: String::new(),
            down_payment: String::new(),
            loan_term: DEFAULT_LOAN_TERM_MONTHS.to_string(),
        }
    }
}

impl FinancingApplication {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("firstName", &self.first_name)?;
        require("lastName", &self.last_name)?;
        require_email("email", &self.email)?;
        require("phone", &self.phone)?;
        require("birthDate", &self.birth_date)?;
        require("address", &self.address)?;
        require("employmentStatus", &self.employment_status)?;
        require("monthlyIncome", &self.monthly_income)?;
        match self.loan_term.trim().parse::<u32>() {
            Ok(months) if (12..=60).contains(&months) => Ok(()),
            _ => Err(ValidationError::invalid_format(
                "loanTerm",
                "must be between 12 and 60 months",
            )),
        }
    }
}
