//! # API Error Type
//!
//! Unified error type for terminal commands.
//!
//! ## Error Handling Strategy
//! ```text
//! CoreError / StoreError
//!      │
//!      ▼
//! ApiError { code, message }  ← this module
//!      │
//!      ▼
//! stderr line + exit code 1
//! ```
//!
//! Every command returns `Result<T, ApiError>`; the machine-readable code
//! keeps scripting against the CLI possible while the message stays
//! human-readable.

use serde::Serialize;

use wireline_core::CoreError;
use wireline_store::StoreError;

/// Error returned from terminal commands.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product or sale record not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Not enough stock to complete the sale
    InsufficientStock,

    /// Business rule rejected the operation
    BusinessLogic,

    /// Reading or writing a persisted document failed
    StorageError,

    /// Unexpected internal error
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

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::NotFound, message)
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::UnknownProduct { .. } | CoreError::NotFound { .. } => ErrorCode::NotFound,
            CoreError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            CoreError::InvalidQuantity { .. }
            | CoreError::EmptySale
            | CoreError::Validation(_) => ErrorCode::ValidationError,
            CoreError::DuplicateProduct { .. } => ErrorCode::BusinessLogic,
        };
        ApiError::new(code, err.to_string())
    }
}

/// Converts storage errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::Malformed { .. } => ApiError::new(ErrorCode::StorageError, err.to_string()),
            StoreError::Io { .. } | StoreError::Serialize { .. } => {
                tracing::error!("storage failure: {err}");
                ApiError::new(ErrorCode::StorageError, err.to_string())
            }
            StoreError::NoDataDir => ApiError::new(ErrorCode::StorageError, err.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use wireline_core::StoreLocation;

    #[test]
    fn test_core_error_codes() {
        let err: ApiError = CoreError::InsufficientStock {
            product: "Widget".to_string(),
            available: 3,
            requested: 5,
        }
        .into();
        assert_eq!(err.code, ErrorCode::InsufficientStock);

        let err: ApiError = CoreError::UnknownProduct {
            store: StoreLocation::PennSquare,
            product: "Widget".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err: ApiError = CoreError::EmptySale.into();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_display_includes_code_and_message() {
        let err = ApiError::validation("quantity must be positive");
        assert_eq!(
            err.to_string(),
            "[ValidationError] quantity must be positive"
        );
    }
}
