//! Export module for budget-dashboard
//!
//! Writes a dashboard report in one of three formats:
//! - CSV: one row per figure (spreadsheet-compatible)
//! - JSON: machine-readable, with schema version and timestamp
//! - YAML: human-readable, with a comment header

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::export_dashboard_csv;
pub use json::{export_dashboard_json, import_dashboard_json, DashboardExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_dashboard_yaml, import_dashboard_yaml};
