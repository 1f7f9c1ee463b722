//! Display formatting for terminal output
//!
//! Amount formatting, bar charts and tables used by the dashboard view.

pub mod report;

pub use report::{
    format_amount, format_bar, format_bar_chart, format_group_table, format_millions,
    format_pareto_table, format_percentage, wrap_label,
};
