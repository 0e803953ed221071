//! Error types for colwright operations
//!
//! Merging, reconciliation and accessors are total and never fail. Errors only
//! surface when inputs are constructed or validated: a caller list carrying
//! duplicate ids, a persisted order with repeated ids, a malformed catalog or
//! an out-of-range configuration value.

use thiserror::Error;

/// Validation errors for caller-supplied column lists and orders.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Duplicate column id in column list: {id}")]
    DuplicateColumnId { id: String },

    #[error("Duplicate id in column order: {id}")]
    DuplicateOrderId { id: String },

    #[error("Column id must not be empty (position {position})")]
    EmptyColumnId { position: usize },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Synthetic column catalog errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Catalog contains no entries")]
    Empty,

    #[error("Duplicate catalog entry for column {id}")]
    DuplicateEntry { id: String },

    #[error("Alias {alias} is claimed by both {first} and {second}")]
    AliasConflict {
        alias: String,
        first: String,
        second: String,
    },

    #[error("Builder for {expected} produced a column with id {actual}")]
    BuilderIdMismatch { expected: String, actual: String },
}

/// Master error type for all colwright errors.
#[derive(Debug, Clone, Error)]
pub enum ColwrightError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Result type alias for colwright operations.
pub type ColwrightResult<T> = Result<T, ColwrightError>;

// =============================================================================
// TESTS
// =============================================================================
