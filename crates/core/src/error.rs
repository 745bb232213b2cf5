//! Uniform API error shape shared by the real and mock backends.
//!
//! Every backend operation, mock or HTTP, fails with the same structured
//! body the BFF emits, so callers keep a single error-handling path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used across the client.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Structured error returned by every backend operation.
///
/// Mirrors the BFF error body:
/// `{error, message, statusCode, correlationId?, timestamp}`.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[error("{error}: {message} (status {status_code})")]
pub struct ApiError {
    /// Machine-readable error code, e.g. `NOT_FOUND`.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ApiError {
    pub fn new(error: &str, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            status_code,
            correlation_id: None,
            timestamp: Utc::now(),
        }
    }

    /// Entity lookup by id failed.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message, 404)
    }

    /// A status-transition precondition was violated.
    pub fn invalid_status(message: impl Into<String>) -> Self {
        Self::new("INVALID_STATUS", message, 400)
    }

    pub fn user_exists(message: impl Into<String>) -> Self {
        Self::new("USER_EXISTS", message, 400)
    }

    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new("INVALID_CREDENTIALS", message, 401)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", message, 401)
    }

    pub fn update_failed(message: impl Into<String>) -> Self {
        Self::new("UPDATE_FAILED", message, 500)
    }

    /// Network failures and anything the BFF did not classify.
    pub fn unknown(message: impl Into<String>, status_code: u16) -> Self {
        Self::new("UNKNOWN_ERROR", message, status_code)
    }

    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }

    pub fn is_not_found(&self) -> bool {
        self.error == "NOT_FOUND"
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status_code == 401
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_code_and_status() {
        let err = ApiError::not_found("Order not found");
        assert_eq!(err.error, "NOT_FOUND");
        assert_eq!(err.status_code, 404);
        assert!(err.is_not_found());

        let err = ApiError::invalid_status("Cannot cancel order in current status");
        assert_eq!(err.error, "INVALID_STATUS");
        assert_eq!(err.status_code, 400);

        let err = ApiError::invalid_credentials("Invalid email or password");
        assert!(err.is_unauthorized());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let err = ApiError::unknown("boom", 500).with_correlation_id("cid-1");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["error"], "UNKNOWN_ERROR");
        assert_eq!(json["statusCode"], 500);
        assert_eq!(json["correlationId"], "cid-1");
        assert!(json.get("timestamp").is_some());
    }
}
