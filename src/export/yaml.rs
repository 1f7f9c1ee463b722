//! YAML Export functionality
//!
//! Exports the dashboard report to YAML for human-readable archiving.

use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::export::json::DashboardExport;
use crate::reports::DashboardReport;

/// Export the dashboard to YAML format
pub fn export_dashboard_yaml<W: Write>(report: &DashboardReport, writer: &mut W) -> BudgetResult<()> {
    let export = DashboardExport::new(report.clone());
    let export_err = |e: std::io::Error| BudgetError::Export(e.to_string());

    writeln!(writer, "# Budget Dashboard Export").map_err(export_err)?;
    writeln!(writer, "# Source: {}", export.report.source).map_err(export_err)?;
    writeln!(writer, "# Selection: {}", export.report.selection_label).map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| BudgetError::Export(e.to_string()))?;

    Ok(())
}

/// Read back a YAML export
pub fn import_dashboard_yaml(yaml_str: &str) -> BudgetResult<DashboardExport> {
    serde_yaml::from_str(yaml_str).map_err(|e| BudgetError::Export(e.to_string()))
}
