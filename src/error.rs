//! Custom error types for budget-dashboard
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Recoverable data problems (an amount that
//! does not parse, a malformed line) are not errors: preparation zeroes or
//! skips them and reports them as diagnostics instead.

use thiserror::Error;

/// The main error type for budget-dashboard operations
#[derive(Error, Debug)]
pub enum BudgetError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV reader/writer errors that are not recoverable per row
    #[error("CSV error: {0}")]
    Csv(String),

    /// Required input columns are missing
    #[error(
        "Missing required columns: {} (found: {})",
        missing.join(", "),
        found.join(", ")
    )]
    Schema {
        missing: Vec<String>,
        found: Vec<String>,
    },

    /// Area filter does not name a known area
    #[error("Unknown area '{area}'. Valid choices: {}", known.join(", "))]
    UnknownArea { area: String, known: Vec<String> },

    /// Validation errors for settings and arguments
    #[error("Validation error: {0}")]
    Validation(String),

    /// Parse cache errors
    #[error("Cache error: {0}")]
    Cache(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl BudgetError {
    /// Create a schema error from the missing and found column names
    pub fn schema(missing: Vec<String>, found: Vec<String>) -> Self {
        Self::Schema { missing, found }
    }

    /// Create an unknown-area error listing the valid choices
    pub fn unknown_area(area: impl Into<String>, known: Vec<String>) -> Self {
        Self::UnknownArea {
            area: area.into(),
            known,
        }
    }

    /// Check if this is a schema error
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }

    /// Check if this is an unknown-area error
    pub fn is_unknown_area(&self) -> bool {
        matches!(self, Self::UnknownArea { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for BudgetError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for budget-dashboard operations
pub type BudgetResult<T> = Result<T, BudgetError>;
