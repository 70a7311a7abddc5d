//! # API Error Type
//!
//! Error shape written to stdout when a command fails.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in basket-cli                             │
//! │                                                                         │
//! │  {"op":"add", "quantity": 0, ...}                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Malformed JSON? ──── serde_json::Error ──────────┐                    │
//! │         │                                          │                    │
//! │         ▼                                          ▼                    │
//! │  Validation Error? ── CoreError ───────────────► ApiError ──► stdout   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Success ──────────────────────────────────────► response ──► stdout   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed command never stops the session; the next line is processed.
//!
//! ```json
//! {"ok":false,"error":{"code":"VALIDATION_ERROR","message":"quantity must be positive"}}
//! ```

use basket_core::{CoreError, ValidationError};
use serde::Serialize;

/// API error returned for a failed command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Item data failed validation
    ValidationError,

    /// Line was not a valid command
    InvalidRequest,

    /// Something went wrong rendering a response
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidRequest, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => e.into(),
            CoreError::Serialization(e) => {
                tracing::error!("Snapshot serialization failed: {}", e);
                ApiError::internal("Failed to render checkout")
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::invalid_request(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
