//! Failure modes shared by the storefront API ports.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Error talking to the storefront REST API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Request never produced a response (DNS, refused, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response. `message` comes from the body when present.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// 2xx response with `success: false`.
    #[error("request rejected: {0}")]
    Rejected(String),
}

impl ApiError {
    /// Builds a status error, falling back to `HTTP {status}` without a body message.
    pub fn status(status: u16, message: Option<String>) -> Self {
        ApiError::Status {
            status,
            message: message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| format!("HTTP {}", status)),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { status: 401 | 403, .. })
    }
}

impl From<ApiError> for DomainError {
    fn from(err: ApiError) -> Self {
        let code = if err.is_not_found() {
            ErrorCode::VehicleNotFound
        } else if err.is_unauthorized() {
            ErrorCode::Unauthorized
        } else {
            ErrorCode::FetchFailed
        };
        DomainError::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_body_message() {
        let err = ApiError::status(422, Some("Email already registered".to_string()));
        assert_eq!(err.to_string(), "Email already registered");
    }

    #[test]
    fn status_falls_back_to_http_code() {
        assert_eq!(ApiError::status(500, None).to_string(), "HTTP 500");
        assert_eq!(ApiError::status(502, Some("  ".to_string())).to_string(), "HTTP 502");
    }

    #[test]
    fn maps_to_domain_error_codes() {
        let not_found: DomainError = ApiError::status(404, None).into();
        assert_eq!(not_found.code, ErrorCode::VehicleNotFound);

        let unauthorized: DomainError = ApiError::status(401, None).into();
        assert_eq!(unauthorized.code, ErrorCode::Unauthorized);

        let network: DomainError = ApiError::Network("refused".to_string()).into();
        assert_eq!(network.code, ErrorCode::FetchFailed);
    }
}
