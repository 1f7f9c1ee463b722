//! Dashboard Report
//!
//! Everything the dashboard shows for one area selection: headline KPIs,
//! income and expense breakdowns by category and area, and the Pareto cut
//! of the expense lines.

use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Settings;
use crate::display::report::{
    double_separator, format_bar_chart, format_header, format_millions, format_pareto_table,
    format_percentage, separator,
};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Amount, RecordType};
use crate::services::{
    aggregate, area_options, AggregationResult, AreaSelection, Dimension, Kpis,
    ParetoAnalysis, PreparedBudget,
};

const WIDTH: usize = 80;
const BAR_WIDTH: usize = 30;

/// Dashboard Report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardReport {
    /// Name of the budget file
    pub source: String,
    pub selection: AreaSelection,
    /// Display label of the selection
    pub selection_label: String,
    /// General label followed by every area
    pub area_options: Vec<String>,
    /// KPIs of the consolidated view, whatever the selection
    pub consolidated: Kpis,
    /// KPIs of the selected scope
    pub scope: Kpis,
    /// Largest positive income categories, descending
    pub income_by_category: AggregationResult,
    /// Positive income areas, ascending
    pub income_by_area: AggregationResult,
    /// Largest positive expense categories, descending
    pub expense_by_category: AggregationResult,
    /// Positive expense areas, ascending
    pub expense_by_area: AggregationResult,
    pub pareto: ParetoAnalysis,
    /// Sum of the records left out of the consolidated view
    pub excluded_total: Amount,
}

impl DashboardReport {
    /// Generate the dashboard for a selection
    pub fn generate(
        prepared: &PreparedBudget,
        selection: &AreaSelection,
        settings: &Settings,
        source: &str,
    ) -> Self {
        let scope = selection.scope(prepared);
        let income = scope.of_type(&RecordType::Income);
        let expense = scope.of_type(&RecordType::Expense);

        debug!(
            selection = selection.label(&settings.labels.general),
            records = scope.len(),
            "generating dashboard"
        );

        Self {
            source: source.to_string(),
            selection: selection.clone(),
            selection_label: selection.label(&settings.labels.general).to_string(),
            area_options: area_options(&prepared.full, &settings.labels.general),
            consolidated: Kpis::compute(&prepared.main),
            scope: Kpis::compute(&scope),
            income_by_category: aggregate(&income, Dimension::Category)
                .positive_only()
                .top_n(settings.income_top_n),
            income_by_area: aggregate(&income, Dimension::Area)
                .positive_only()
                .sorted_ascending(),
            expense_by_category: aggregate(&expense, Dimension::Category)
                .positive_only()
                .top_n(settings.expense_top_n),
            expense_by_area: aggregate(&expense, Dimension::Area)
                .positive_only()
                .sorted_ascending(),
            pareto: ParetoAnalysis::compute(&scope, &settings.pareto),
            excluded_total: prepared.excluded_total,
        }
    }

    /// Format the report for terminal display
    ///
    /// The Pareto table is shown for a specific area, or always when
    /// `show_pareto` is set.
    pub fn format_terminal(&self, settings: &Settings, show_pareto: bool) -> String {
        let symbol = settings.currency_symbol.as_str();
        let wrap = settings.label_wrap_width;
        let mut output = String::new();

        output.push_str(&format_header(
            &format!("Budget Dashboard: {}", self.source),
            WIDTH,
        ));
        output.push('\n');
        output.push_str(&double_separator(WIDTH));
        output.push('\n');
        output.push_str(&format!("Selection: {}\n", self.selection_label));
        output.push_str(&format!(
            "Available: {}\n\n",
            self.area_options.join(", ")
        ));

        output.push_str(&format_kpis("Consolidated", &self.consolidated, symbol));
        if !self.selection.is_general() {
            output.push_str(&format_kpis(&self.selection_label, &self.scope, symbol));
        }
        if !self.excluded_total.is_zero() {
            output.push_str(&format!(
                "Excluded from consolidated view: {}\n",
                format_millions(self.excluded_total.value(), symbol)
            ));
        }

        let sections = [
            (
                format!("Income by Category (top {})", settings.income_top_n),
                &self.income_by_category,
            ),
            ("Income by Area".to_string(), &self.income_by_area),
            (
                format!("Expense by Category (top {})", settings.expense_top_n),
                &self.expense_by_category,
            ),
            ("Expense by Area".to_string(), &self.expense_by_area),
        ];

        for (title, result) in sections {
            output.push('\n');
            output.push_str(&title);
            output.push('\n');
            output.push_str(&separator(WIDTH));
            output.push('\n');
            if result.is_empty() {
                output.push_str("  (no data)\n");
            } else {
                output.push_str(&format_bar_chart(result, symbol, wrap, BAR_WIDTH));
            }
        }

        if show_pareto || !self.selection.is_general() {
            output.push('\n');
            output.push_str(&self.format_pareto(symbol));
        }

        output
    }

    /// Pareto section: summary line and the table of selected cost centers
    pub fn format_pareto(&self, symbol: &str) -> String {
        format_pareto_section(&self.pareto, symbol)
    }

    /// Export the report to CSV format
    ///
    /// One row per figure: `section,key,amount,cumulative`, raw decimals.
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> BudgetResult<()> {
        let mut out = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| BudgetError::Export(e.to_string());

        out.write_record(["section", "key", "amount", "cumulative"])
            .map_err(export_err)?;

        for (prefix, kpis) in [("consolidated", &self.consolidated), ("scope", &self.scope)] {
            let section = format!("{}_kpi", prefix);
            for (key, value) in [
                ("total_income", kpis.total_income.to_string()),
                ("total_expense", kpis.total_expense.to_string()),
                ("net_result", kpis.net_result.normalize().to_string()),
            ] {
                out.write_record([section.as_str(), key, value.as_str(), ""])
                    .map_err(export_err)?;
            }
        }

        let excluded = self.excluded_total.to_string();
        out.write_record(["excluded", "total", excluded.as_str(), ""])
            .map_err(export_err)?;

        for (section, result) in [
            ("income_by_category", &self.income_by_category),
            ("income_by_area", &self.income_by_area),
            ("expense_by_category", &self.expense_by_category),
            ("expense_by_area", &self.expense_by_area),
        ] {
            for group in result {
                let amount = group.amount.to_string();
                out.write_record([section, group.key.as_str(), amount.as_str(), ""])
                    .map_err(export_err)?;
            }
        }

        for entry in &self.pareto.entries {
            let amount = entry.amount.to_string();
            let cumulative = entry.cumulative_amount.to_string();
            out.write_record([
                "pareto",
                entry.cost_center.as_str(),
                amount.as_str(),
                cumulative.as_str(),
            ])
            .map_err(export_err)?;
        }

        out.flush()
            .map_err(|e| BudgetError::Export(e.to_string()))?;
        Ok(())
    }
}

fn format_kpis(title: &str, kpis: &Kpis, symbol: &str) -> String {
    format!(
        "{:<20} Income {:>10}   Expense {:>10}   Net {:>10}\n",
        title,
        format_millions(kpis.total_income.value(), symbol),
        format_millions(kpis.total_expense.value(), symbol),
        format_millions(kpis.net_result, symbol),
    )
}

/// Format a Pareto analysis on its own
pub fn format_pareto_section(pareto: &ParetoAnalysis, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Pareto Analysis ({} of expenses)\n",
        format_percentage(pareto.threshold)
    ));
    output.push_str(&separator(WIDTH));
    output.push('\n');

    if pareto.is_empty() {
        output.push_str("  (no expense lines to analyse)\n");
        return output;
    }

    output.push_str(&format!(
        "{} of {} cost centers cover {} of {}\n",
        pareto.entries.len(),
        pareto.candidate_count,
        format_percentage(pareto.coverage()),
        format_millions(pareto.total.value(), symbol)
    ));
    output.push_str(&format_pareto_table(pareto, symbol));
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetRecord, BudgetTable};
    use crate::services::exclusion::{split_exclusions, ExclusionRule, DEFAULT_EXCLUDED_AREA};
    use crate::services::pareto::DEFAULT_EXCLUDED_CATEGORY;
    use rust_decimal_macros::dec;

    fn prepared() -> PreparedBudget {
        let m = |v: i64| Amount::new(rust_decimal::Decimal::from(v) * dec!(1000000));
        split_exclusions(
            BudgetTable::new(vec![
                BudgetRecord::income("Grants", DEFAULT_EXCLUDED_AREA, "RD-1", m(40)),
                BudgetRecord::expense("Lab", DEFAULT_EXCLUDED_AREA, "RD-2", m(10)),
                BudgetRecord::income("Sales", "Commercial", "CO-1", m(100)),
                BudgetRecord::income("Services", "Commercial", "CO-2", m(20)),
                BudgetRecord::expense(DEFAULT_EXCLUDED_CATEGORY, "Commercial", "CO-3", m(70)),
                BudgetRecord::expense("Fleet", "Commercial", "CO-4", m(30)),
                BudgetRecord::expense("Rent", "Commercial", "CO-5", m(15)),
                BudgetRecord::expense("Misc", "Commercial", "CO-6", m(5)),
            ]),
            &[ExclusionRule::default()],
        )
    }

    #[test]
    fn test_generate_general() {
        let settings = Settings::default();
        let report =
            DashboardReport::generate(&prepared(), &AreaSelection::General, &settings, "b.csv");

        assert_eq!(report.selection_label, "General");
        assert_eq!(report.area_options[0], "General");
        assert_eq!(report.area_options.len(), 3);

        // Excluded income is gone from the consolidated figures
        assert_eq!(report.consolidated.total_income.value(), dec!(120000000));
        assert_eq!(report.consolidated, report.scope);
        assert_eq!(report.excluded_total.value(), dec!(40000000));

        assert_eq!(report.income_by_category.groups[0].key, "Sales");
        assert_eq!(report.expense_by_area.len(), 2);
        assert!(
            report.expense_by_area.groups[0].amount <= report.expense_by_area.groups[1].amount
        );

        // Personnel is left out of the Pareto cut
        let centers: Vec<&str> = report
            .pareto
            .entries
            .iter()
            .map(|e| e.cost_center.as_str())
            .collect();
        assert_eq!(centers, vec!["CO-4", "CO-5", "RD-2"]);
    }

    #[test]
    fn test_generate_area_keeps_excluded_records() {
        let settings = Settings::default();
        let selection = AreaSelection::Area(DEFAULT_EXCLUDED_AREA.to_string());
        let report = DashboardReport::generate(&prepared(), &selection, &settings, "b.csv");

        assert_eq!(report.scope.total_income.value(), dec!(40000000));
        assert_eq!(report.consolidated.total_income.value(), dec!(120000000));
        assert_eq!(report.income_by_area.len(), 1);
    }

    #[test]
    fn test_pareto_section_matches_report() {
        let settings = Settings::default();
        let selection = AreaSelection::Area("Commercial".to_string());
        let prepared = prepared();
        let report = DashboardReport::generate(&prepared, &selection, &settings, "b.csv");

        let pareto = ParetoAnalysis::compute(&selection.scope(&prepared), &settings.pareto);
        let section = format_pareto_section(&pareto, "$");
        assert_eq!(section, report.format_pareto("$"));
        assert!(section.contains("CO-4"));
        assert!(!section.contains("CO-3"));
    }

    #[test]
    fn test_top_n_limits_categories() {
        let mut settings = Settings::default();
        settings.income_top_n = 1;
        let report =
            DashboardReport::generate(&prepared(), &AreaSelection::General, &settings, "b.csv");
        assert_eq!(report.income_by_category.len(), 1);
    }

    #[test]
    fn test_format_terminal() {
        let settings = Settings::default();
        let general =
            DashboardReport::generate(&prepared(), &AreaSelection::General, &settings, "b.csv");

        let output = general.format_terminal(&settings, false);
        assert!(output.contains("Budget Dashboard: b.csv"));
        assert!(output.contains("Consolidated"));
        assert!(output.contains("$120"));
        assert!(output.contains("Income by Category (top 6)"));
        assert!(!output.contains("Pareto Analysis"));

        let forced = general.format_terminal(&settings, true);
        assert!(forced.contains("Pareto Analysis (80% of expenses)"));
        assert!(forced.contains("CO-4"));

        let area = DashboardReport::generate(
            &prepared(),
            &AreaSelection::Area("Commercial".into()),
            &settings,
            "b.csv",
        );
        assert!(area.format_terminal(&settings, false).contains("Pareto Analysis"));
    }

    #[test]
    fn test_export_csv() {
        let settings = Settings::default();
        let report =
            DashboardReport::generate(&prepared(), &AreaSelection::General, &settings, "b.csv");

        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();
        let csv_output = String::from_utf8(buffer).unwrap();

        assert!(csv_output.starts_with("section,key,amount,cumulative\n"));
        assert!(csv_output.contains("consolidated_kpi,total_income,120000000,"));
        assert!(csv_output.contains("income_by_category,Sales,100000000,"));
        assert!(csv_output.contains("pareto,CO-4,30000000,30000000"));
        assert!(csv_output.contains("pareto,CO-5,15000000,45000000"));
        assert!(!csv_output.contains("pareto,CO-6"));
    }
}
