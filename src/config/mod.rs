//! Configuration module for budget-dashboard
//!
//! This module provides configuration management including:
//! - Path resolution for settings and the parse cache
//! - User settings persistence (column names, labels, exclusion policy)

pub mod paths;
pub mod settings;

pub use paths::BudgetPaths;
pub use settings::{ColumnNames, Labels, Settings};
