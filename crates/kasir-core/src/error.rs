//! # Error Types
//!
//! Domain-specific error types for kasir-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kasir-core errors (this file)                                         │
//! │  ├── CoreError        - Domain rule violations                         │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── ErrorKind        - Stable classification shared by all layers     │
//! │                                                                         │
//! │  kasir-db errors (separate crate)                                      │
//! │  ├── DbError          - Database operation failures                    │
//! │  └── StoreError       - CoreError | DbError from one repository call   │
//! │                                                                         │
//! │  HTTP errors (in app)                                                  │
//! │  └── ApiError         - What clients see (code + message)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → ApiError → Client    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product ID, name, etc.)
//! 3. Errors are enum variants, never String
//! 4. Every error maps to exactly one [`ErrorKind`]

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Error Kind
// =============================================================================

/// Stable, client-visible classification of every failure.
///
/// ```text
/// NotFound          product / category / transaction lookup miss
/// Conflict          duplicate on create, no-op update, row still referenced
/// Validation        malformed input (price, stock, quantity, dates)
/// InsufficientStock checkout asked for more than is on the shelf
/// Infrastructure    store connectivity, locking, constraint failures
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Validation,
    InsufficientStock,
    Infrastructure,
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations detected locally. They
/// are always returned to the caller as typed failures.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found.
    ///
    /// ## When This Occurs
    /// - Product ID doesn't exist in database
    /// - Checkout references a product deleted in the meantime
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// Category cannot be found.
    ///
    /// ## When This Occurs
    /// - Category ID doesn't exist
    /// - Creating/updating a product with an unknown category_id
    #[error("Category not found: {0}")]
    CategoryNotFound(i64),

    /// Transaction cannot be found in the ledger.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(i64),

    /// Insufficient stock to complete a checkout.
    ///
    /// ## Checkout Workflow
    /// ```text
    /// Checkout [(Kopi, 5)]
    ///      │
    ///      ▼
    /// Read stock inside the unit of work: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { product: "Kopi", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// Whole checkout rolled back, client sees INSUFFICIENT_STOCK
    /// ```
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// An identical record already exists.
    #[error("A {entity} with the same {fields} already exists")]
    Duplicate { entity: String, fields: String },

    /// An update request carries nothing that differs from the stored row.
    #[error("No changes detected; the updated {entity} is identical to the current data")]
    NoChanges { entity: String },

    /// A row cannot be removed because other rows still reference it.
    #[error("{entity} {id} is still referenced by {referenced_by}")]
    InUse {
        entity: String,
        id: i64,
        referenced_by: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a Duplicate error.
    pub fn duplicate(entity: impl Into<String>, fields: impl Into<String>) -> Self {
        CoreError::Duplicate {
            entity: entity.into(),
            fields: fields.into(),
        }
    }

    /// Creates a NoChanges error.
    pub fn no_changes(entity: impl Into<String>) -> Self {
        CoreError::NoChanges {
            entity: entity.into(),
        }
    }

    /// Returns the stable classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::ProductNotFound(_)
            | CoreError::CategoryNotFound(_)
            | CoreError::TransactionNotFound(_) => ErrorKind::NotFound,
            CoreError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
            CoreError::Duplicate { .. } | CoreError::NoChanges { .. } | CoreError::InUse { .. } => {
                ErrorKind::Conflict
            }
            CoreError::Validation(_) => ErrorKind::Validation,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before any store access.
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
    #[error("{field} must be greater than zero")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Invalid format (e.g., a date that is not YYYY-MM-DD).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A report bound that is not a `YYYY-MM-DD` calendar date.
    #[error("{field} must be a date in YYYY-MM-DD format, got '{value}'")]
    InvalidDateFormat { field: String, value: String },

    /// A range whose start lies after its end.
    #[error("{start_field} must not be after {end_field}")]
    InvertedRange {
        start_field: String,
        end_field: String,
    },
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
            product: "Kopi Susu".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Kopi Susu: available 3, requested 5"
        );

        assert_eq!(CoreError::ProductNotFound(42).to_string(), "Product not found: 42");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price must be greater than zero");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_kinds_are_distinct_per_family() {
        assert_eq!(CoreError::ProductNotFound(1).kind(), ErrorKind::NotFound);
        assert_eq!(CoreError::CategoryNotFound(1).kind(), ErrorKind::NotFound);
        assert_eq!(
            CoreError::duplicate("category", "name and description").kind(),
            ErrorKind::Conflict
        );
        assert_eq!(CoreError::no_changes("product").kind(), ErrorKind::Conflict);
        assert_eq!(
            CoreError::InsufficientStock {
                product: "A".to_string(),
                available: 0,
                requested: 1,
            }
            .kind(),
            ErrorKind::InsufficientStock
        );
    }

    #[test]
    fn test_error_kind_wire_format() {
        let json = serde_json::to_string(&ErrorKind::InsufficientStock).unwrap();
        assert_eq!(json, "\"INSUFFICIENT_STOCK\"");
    }
}
