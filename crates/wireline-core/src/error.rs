//! # Error Types
//!
//! Domain-specific error types for wireline-core.
//!
//! ## Error Hierarchy
//! ```text
//! wireline-core errors (this file)
//! ├── CoreError        - Business rule violations
//! └── ValidationError  - Input validation failures
//!
//! wireline-store errors (separate crate)
//! └── StoreError       - File read/write/parse failures
//!
//! Terminal app errors
//! └── ApiError         - What the operator sees
//!
//! Flow: ValidationError → CoreError → ApiError → operator
//! ```
//!
//! Every error is recoverable: an operation either succeeds or is rejected
//! with no partial state change.

use thiserror::Error;

use crate::types::StoreLocation;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent business rule violations or domain logic failures and
/// should be translated to user-facing messages at the app layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product is not in the catalog at the given store.
    #[error("Product not found at {store}: {product}")]
    UnknownProduct {
        store: StoreLocation,
        product: String,
    },

    /// Insufficient stock to complete a sale.
    ///
    /// ## When This Occurs
    /// - A sale requests more units than the store has on hand
    /// - Several line items of one sale name the same product and their
    ///   combined quantity exceeds the available stock
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// Quantity is non-positive or beyond the per-item maximum.
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity { quantity: i64 },

    /// A sale was submitted with no line items.
    #[error("Sale has no line items")]
    EmptySale,

    /// Catalog operation would collide with an existing product.
    ///
    /// ## When This Occurs
    /// - Renaming a product to the name of a different existing product
    #[error("Product '{product}' already exists at {store}")]
    DuplicateProduct {
        store: StoreLocation,
        product: String,
    },

    /// No sale record at the given index (admin delete/edit).
    #[error("No sale record at index {index}")]
    NotFound { index: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller input does not meet requirements; they are
/// checked before any business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            product: "Widget".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Widget: available 3, requested 5"
        );

        let err = CoreError::UnknownProduct {
            store: StoreLocation::PennSquare,
            product: "Widget".to_string(),
        };
        assert_eq!(err.to_string(), "Product not found at 1 E Penn Sq: Widget");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "product name".to_string(),
        };
        assert_eq!(err.to_string(), "product name is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "employee".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
