//! budget-dashboard - budget file analysis from the command line
//!
//! Reads a delimited budget file (one line per income or expense item, each
//! tagged with a category, an area and a cost center) and reports headline
//! KPIs, breakdowns by category and area, and a Pareto (80/20) analysis of
//! the cost centers that account for most of the spending.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Amounts, records and the record table
//! - `services`: Preparation, exclusions, area selection and the analyses
//! - `storage`: Parse cache on disk
//! - `reports`: The dashboard report
//! - `display`: Terminal formatting helpers
//! - `export`: JSON, YAML and CSV export
//! - `cli`: Command handlers for the binary
//! - `logging`: Tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_dashboard::config::Settings;
//! use budget_dashboard::services::{AreaSelection, BudgetLoader};
//! use budget_dashboard::reports::DashboardReport;
//!
//! let settings = Settings::default();
//! let loaded = BudgetLoader::uncached(&settings).load("budget.csv".as_ref())?;
//! let selection = AreaSelection::resolve(Some("North"), &loaded.prepared.full, "General")?;
//! let report = DashboardReport::generate(&loaded.prepared, &selection, &settings, "budget.csv");
//! println!("{}", report.format_terminal(&settings, true));
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{BudgetError, BudgetResult};
