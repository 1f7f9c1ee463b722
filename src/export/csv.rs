//! CSV Export functionality
//!
//! Flat, spreadsheet-friendly dump of the dashboard figures.

use std::io::Write;

use crate::error::BudgetResult;
use crate::reports::DashboardReport;

/// Export the dashboard sections to CSV
pub fn export_dashboard_csv<W: Write>(report: &DashboardReport, writer: &mut W) -> BudgetResult<()> {
    report.export_csv(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::json::tests::sample_report;

    #[test]
    fn test_csv_export_sections() {
        let mut buffer = Vec::new();
        export_dashboard_csv(&sample_report(), &mut buffer).unwrap();
        let csv_str = String::from_utf8(buffer).unwrap();

        let mut reader = ::csv::Reader::from_reader(csv_str.as_bytes());
        let sections: Vec<String> = reader
            .records()
            .map(|r| r.unwrap()[0].to_string())
            .collect();

        assert!(sections.contains(&"consolidated_kpi".to_string()));
        assert!(sections.contains(&"expense_by_area".to_string()));
        assert_eq!(sections.iter().filter(|s| *s == "pareto").count(), 2);
    }
}
