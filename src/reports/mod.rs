//! Reports module for budget-dashboard
//!
//! The dashboard report gathers every figure for one area selection and
//! renders it for the terminal or as CSV.

pub mod dashboard;

pub use dashboard::{format_pareto_section, DashboardReport};
