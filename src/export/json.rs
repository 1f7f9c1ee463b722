//! JSON Export functionality
//!
//! Exports the dashboard report to JSON with schema versioning.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BudgetError, BudgetResult};
use crate::reports::DashboardReport;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Dashboard export envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub report: DashboardReport,
}

impl DashboardExport {
    pub fn new(report: DashboardReport) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            report,
        }
    }
}

/// Export the dashboard to JSON
pub fn export_dashboard_json<W: Write>(
    report: &DashboardReport,
    writer: &mut W,
    pretty: bool,
) -> BudgetResult<()> {
    let export = DashboardExport::new(report.clone());

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    }
    .map_err(|e| BudgetError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| BudgetError::Export(e.to_string()))?;
    Ok(())
}

/// Read back a JSON export
pub fn import_dashboard_json(json_str: &str) -> BudgetResult<DashboardExport> {
    let export: DashboardExport = serde_json::from_str(json_str)?;

    if export.schema_version.split('.').next() != EXPORT_SCHEMA_VERSION.split('.').next() {
        return Err(BudgetError::Export(format!(
            "Unsupported export schema version {} (expected {})",
            export.schema_version, EXPORT_SCHEMA_VERSION
        )));
    }

    Ok(export)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::{Amount, BudgetRecord, BudgetTable};
    use crate::services::{split_exclusions, AreaSelection};
    use rust_decimal_macros::dec;

    pub(crate) fn sample_report() -> DashboardReport {
        let prepared = split_exclusions(
            BudgetTable::new(vec![
                BudgetRecord::income("Sales", "North", "CC-1", Amount::new(dec!(900))),
                BudgetRecord::expense("Fleet", "North", "CC-2", Amount::new(dec!(600))),
                BudgetRecord::expense("Rent", "South", "CC-3", Amount::new(dec!(300))),
                BudgetRecord::expense("Misc", "South", "CC-4", Amount::new(dec!(100))),
            ]),
            &Settings::default().exclusions,
        );
        DashboardReport::generate(
            &prepared,
            &AreaSelection::General,
            &Settings::default(),
            "budget.csv",
        )
    }

    #[test]
    fn test_json_export_roundtrips_report() {
        let report = sample_report();
        let mut buffer = Vec::new();
        export_dashboard_json(&report, &mut buffer, false).unwrap();

        let json_str = String::from_utf8(buffer).unwrap();
        assert!(json_str.contains("\"schema_version\":\"1.0.0\""));

        let imported = import_dashboard_json(&json_str).unwrap();
        assert_eq!(imported.report, report);
        assert_eq!(imported.app_version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_pretty_json_is_indented() {
        let mut buffer = Vec::new();
        export_dashboard_json(&sample_report(), &mut buffer, true).unwrap();
        let json_str = String::from_utf8(buffer).unwrap();
        assert!(json_str.contains("\n  \"schema_version\""));
    }

    #[test]
    fn test_amounts_are_raw_decimals() {
        let mut buffer = Vec::new();
        export_dashboard_json(&sample_report(), &mut buffer, false).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(value["report"]["consolidated"]["total_income"], "900");
        assert_eq!(value["report"]["pareto"]["entries"][0]["cost_center"], "CC-2");
    }

    #[test]
    fn test_rejects_future_major_version() {
        let mut buffer = Vec::new();
        export_dashboard_json(&sample_report(), &mut buffer, false).unwrap();
        let json_str = String::from_utf8(buffer)
            .unwrap()
            .replace("\"1.0.0\"", "\"2.0.0\"");

        assert!(matches!(
            import_dashboard_json(&json_str),
            Err(BudgetError::Export(_))
        ));
    }
}
