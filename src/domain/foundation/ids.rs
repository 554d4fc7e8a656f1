//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Backend identifier of a vehicle record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VehicleId(String);

impl VehicleId {
    /// Creates a new VehicleId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("vehicle_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for VehicleId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VehicleId> for String {
    fn from(value: VehicleId) -> Self {
        value.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// URL slug naming a vehicle in storefront routes (`/vehicles/{slug}`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VehicleSlug(String);

impl VehicleSlug {
    /// Creates a slug, rejecting empty values and path separators.
    pub fn new(slug: impl Into<String>) -> Result<Self, ValidationError> {
        let slug = slug.into();
        if slug.is_empty() {
            return Err(ValidationError::empty_field("slug"));
        }
        if slug.contains('/') || slug.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid_format(
                "slug",
                "must not contain '/' or whitespace",
            ));
        }
        Ok(Self(slug))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for VehicleSlug {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VehicleSlug> for String {
    fn from(value: VehicleSlug) -> Self {
        value.0
    }
}

impl fmt::Display for VehicleSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VehicleSlug {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// User identifier (from the auth provider).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoticeId(Uuid);

impl NoticeId {
    /// Creates a new random NoticeId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NoticeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoticeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vehicle_id_rejects_blank() {
        assert!(VehicleId::new("").is_err());
        assert!(VehicleId::new("   ").is_err());
        assert_eq!(VehicleId::new("veh_42").unwrap().as_str(), "veh_42");
    }

    #[test]
    fn vehicle_slug_parses_valid_value() {
        let slug: VehicleSlug = "toyota-vios-2024".parse().unwrap();
        assert_eq!(slug.to_string(), "toyota-vios-2024");
    }

    #[test]
    fn vehicle_slug_rejects_path_separators() {
        let result = VehicleSlug::new("a/b");
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn vehicle_slug_rejects_whitespace() {
        assert!(VehicleSlug::new("toyota vios").is_err());
    }

    #[test]
    fn user_id_rejects_empty() {
        assert_eq!(
            UserId::new(""),
            Err(ValidationError::empty_field("user_id"))
        );
    }

    #[test]
    fn vehicle_id_serializes_as_plain_string() {
        let id = VehicleId::new("veh_1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"veh_1\"");
    }

    #[test]
    fn deserializing_runs_the_same_checks_as_new() {
        assert!(serde_json::from_str::<VehicleId>("\"  \"").is_err());
        assert!(serde_json::from_str::<VehicleSlug>("\"\"").is_err());
        assert!(serde_json::from_str::<VehicleSlug>("\"a/b\"").is_err());
        assert!(serde_json::from_str::<UserId>("\"\"").is_err());
        let slug: VehicleSlug = serde_json::from_str("\"toyota-vios\"").unwrap();
        assert_eq!(slug.as_str(), "toyota-vios");
    }

    #[test]
    fn notice_id_generates_unique_values() {
        assert_ne!(NoticeId::new(), NoticeId::new());
    }
}
