//! Configurator error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised by configurator operations.
///
/// Both variants are raised before any state is touched, so a failed
/// operation never leaves a partially applied selection behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfiguratorError {
    /// Operation attempted before the base vehicle was loaded.
    #[error("Configuration is not initialized: base vehicle has not been loaded")]
    Uninitialized,

    /// Selection or toggle named an option absent from its catalog.
    #[error("Unknown {field} option '{name}'")]
    UnknownOption { field: &'static str, name: String },
}

impl ConfiguratorError {
    pub fn unknown_option(field: &'static str, name: impl Into<String>) -> Self {
        ConfiguratorError::UnknownOption {
            field,
            name: name.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ConfiguratorError::Uninitialized => ErrorCode::ConfigurationUninitialized,
            ConfiguratorError::UnknownOption { .. } => ErrorCode::UnknownOption,
        }
    }
}

impl From<ConfiguratorError> for DomainError {
    fn from(err: ConfiguratorError) -> Self {
        let domain = DomainError::new(err.code(), err.to_string());
        match err {
            ConfiguratorError::UnknownOption { field, name } => domain
                .with_detail("field", field)
                .with_detail("name", name),
            ConfiguratorError::Uninitialized => domain,
        }
    }
}
