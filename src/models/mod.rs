//! Core data models for budget-dashboard
//!
//! This module contains the line-item model loaded from the budget file and
//! the amount type shared by every aggregation.

pub mod amount;
pub mod record;
pub mod table;

pub use amount::{Amount, AmountParseError};
pub use record::{normalize_text, BudgetRecord, RecordType, NOT_AVAILABLE};
pub use table::BudgetTable;
