use serde::Serialize;

use super::{require, require_email};
use crate::domain::foundation::ValidationError;

pub const DEFAULT_LOCATION: &str = "Malabon Showroom";

/// Bookable appointment slots.
pub const TIME_SLOTS: [&str; 7] = [
    "9:00 AM", "10:00 AM", "11:00 AM", "1:00 PM", "2:00 PM", "3:00 PM", "4:00 PM",
];

/// `POST /api/test-drive` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestDriveRequest {
    pub vehicle_id: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub location: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Default for TestDriveRequest {
    fn default() -> Self {
        Self {
            vehicle_id: String::new(),
            preferred_date: String::new(),
            preferred_time: String::new(),
            location: DEFAULT_LOCATION.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            notes: None,
        }
    }
}

impl TestDriveRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("firstName", &self.first_name)?;
        require("lastName", &self.last_name)?;
        require_email("email", &self.email)?;
        require("phone", &self.phone)?;
        require("preferredDate", &self.preferred_date)?;
        require("preferredTime", &self.preferred_time)?;
        if !TIME_SLOTS.contains(&self.preferred_time.as_str()) {
            return Err(ValidationError::invalid_format(
                "preferredTime",
                format!("'{}' is not an available slot", self.preferred_time),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking() -> TestDriveRequest {
        TestDriveRequest {
            vehicle_id: "veh_1".to_string(),
            preferred_date: "2026-11-02".to_string(),
            preferred_time: "10:00 AM".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Reyes".to_string(),
            email: "ana@example.ph".to_string(),
            phone: "09171234567".to_string(),
            ..TestDriveRequest::default()
        }
    }

    #[test]
    fn defaults_to_showroom_location() {
        assert_eq!(TestDriveRequest::default().location, "Malabon Showroom");
    }

    #[test]
    fn complete_booking_is_valid() {
        assert!(booking().validate().is_ok());
    }

    #[test]
    fn rejects_unlisted_time_slot() {
        let mut request = booking();
        request.preferred_time = "12:00 PM".to_string();
        assert!(matches!(
            request.validate(),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn serializes_camel_case_and_omits_empty_notes() {
        let json = serde_json::to_value(booking()).unwrap();
        assert_eq!(json["preferredTime"], "10:00 AM");
        assert!(json.get("notes").is_none());
    }
}
