//! Report formatting utilities for terminal output
//!
//! Amounts are shown in whole currency units or in millions, with `.` as the
//! thousands separator.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::services::{AggregationResult, ParetoAnalysis};

/// Format a value in whole units, e.g. `$1.234.567`
pub fn format_amount(value: Decimal, symbol: &str) -> String {
    let rounded = value.round();
    let digits = group_thousands(&rounded.abs().to_string());

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}{}", symbol, digits)
    } else {
        format!("{}{}", symbol, digits)
    }
}

/// Format a value in millions, e.g. `1_234_500_000` -> `$1.234`
///
/// Rounds half to even.
pub fn format_millions(value: Decimal, symbol: &str) -> String {
    format_amount(value / Decimal::from(1_000_000), symbol)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Format a share in [0, 1] as a percentage with appropriate precision
pub fn format_percentage(share: Decimal) -> String {
    let pct = share * Decimal::ONE_HUNDRED;
    if pct < Decimal::new(1, 1) && pct > Decimal::ZERO {
        format!("{:.2}%", pct)
    } else if pct < Decimal::TEN {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: Decimal, max_value: Decimal, width: usize) -> String {
    if max_value <= Decimal::ZERO || value <= Decimal::ZERO {
        return " ".repeat(width);
    }

    let filled = (value / max_value * Decimal::from(width))
        .round()
        .to_usize()
        .unwrap_or(width)
        .min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a header line with padding
pub fn format_header(title: &str, width: usize) -> String {
    let len = title.chars().count();
    let padding = if len >= width { 0 } else { (width - len) / 2 };
    format!("{}{}", " ".repeat(padding), title)
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum length with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

/// Wrap a label into lines of at most `width` characters
///
/// Words are never split; a word longer than `width` gets a line of its own.
pub fn wrap_label(label: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in label.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Horizontal bar chart of group totals, one group per row
///
/// Long keys wrap onto extra lines above their bar.
pub fn format_bar_chart(
    result: &AggregationResult,
    symbol: &str,
    label_width: usize,
    bar_width: usize,
) -> String {
    let max = result.max_amount().map(|a| a.value()).unwrap_or_default();
    let mut output = String::new();

    for group in result {
        let mut lines = wrap_label(&group.key, label_width);
        let last = lines.pop().unwrap_or_default();
        for line in lines {
            output.push_str(&format!("  {}\n", line));
        }
        output.push_str(&format!(
            "  {:<label_width$} {} {:>8}\n",
            last,
            format_bar(group.amount.value(), max, bar_width),
            format_millions(group.amount.value(), symbol),
            label_width = label_width,
        ));
    }

    output
}

const COST_CENTER_WIDTH: usize = 40;

#[derive(Tabled)]
struct ParetoRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Cost Center")]
    cost_center: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "Cumulative")]
    cumulative: String,
}

/// Table of the Pareto prefix
pub fn format_pareto_table(analysis: &ParetoAnalysis, symbol: &str) -> String {
    let rows: Vec<ParetoRow> = analysis
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| ParetoRow {
            rank: i + 1,
            cost_center: truncate(&entry.cost_center, COST_CENTER_WIDTH),
            amount: format_amount(entry.amount.value(), symbol),
            share: format_percentage(analysis.share_of(entry)),
            cumulative: format_percentage(entry.cumulative_amount.share_of(analysis.total)),
        })
        .collect();

    Table::new(rows).with(Style::modern()).to_string()
}

/// Table of group totals, headed by the dimension name
pub fn format_group_table(result: &AggregationResult, symbol: &str) -> String {
    let mut builder = Builder::default();
    builder.push_record([
        result.dimension.label().to_string(),
        "Amount".to_string(),
        "Records".to_string(),
    ]);
    for group in result {
        builder.push_record([
            group.key.clone(),
            format_amount(group.amount.value(), symbol),
            group.count.to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, BudgetRecord, BudgetTable};
    use crate::services::{aggregate, Dimension, ParetoOptions};
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_millions() {
        assert_eq!(format_millions(dec!(1234500000), "$"), "$1.234");
        assert_eq!(format_millions(dec!(2500000), "$"), "$2");
        assert_eq!(format_millions(dec!(3500000), "$"), "$4");
        assert_eq!(format_millions(dec!(0), "$"), "$0");
        assert_eq!(format_millions(dec!(400000), "$"), "$0");
        assert_eq!(format_millions(dec!(-7000000), "$"), "-$7");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec!(1234567.4), "$"), "$1.234.567");
        assert_eq!(format_amount(dec!(999), "€"), "€999");
        assert_eq!(format_amount(dec!(1000), "$"), "$1.000");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(dec!(0.0005)), "0.05%");
        assert_eq!(format_percentage(dec!(0.055)), "5.5%");
        assert_eq!(format_percentage(dec!(0.5)), "50%");
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(dec!(50), dec!(100), 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(format_bar(dec!(0), dec!(100), 4), "    ");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Test", 4), "Test");
        assert_eq!(truncate("Développement", 6), "Dév...");
    }

    #[test]
    fn test_wrap_label() {
        assert_eq!(
            wrap_label("Research & Development-Floral", 25),
            vec!["Research &", "Development-Floral"]
        );
        assert_eq!(wrap_label("Travel", 25), vec!["Travel"]);
        assert_eq!(wrap_label("Extraordinarily-long-label", 5), vec!["Extraordinarily-long-label"]);
        assert_eq!(wrap_label("", 25), vec![""]);
    }

    #[test]
    fn test_pareto_table_lists_entries() {
        let table = BudgetTable::new(vec![
            BudgetRecord::expense("Ops", "North", "Fleet", Amount::new(dec!(600))),
            BudgetRecord::expense("Ops", "North", "Rent", Amount::new(dec!(300))),
            BudgetRecord::expense("Ops", "North", "Misc", Amount::new(dec!(100))),
        ]);
        let analysis = ParetoAnalysis::compute(&table, &ParetoOptions::default());

        let rendered = format_pareto_table(&analysis, "$");
        assert!(rendered.contains("Fleet"));
        assert!(rendered.contains("Rent"));
        assert!(!rendered.contains("Misc"));
        assert!(rendered.contains("60%"));
        assert!(rendered.contains("90%"));
    }

    #[test]
    fn test_group_table_and_chart() {
        let table = BudgetTable::new(vec![
            BudgetRecord::income("Sales", "North", "CC-1", Amount::new(dec!(3000000))),
            BudgetRecord::income("Grants", "South", "CC-2", Amount::new(dec!(1000000))),
        ]);
        let result = aggregate(&table, Dimension::Area);

        let rendered = format_group_table(&result, "$");
        assert!(rendered.contains("Area"));
        assert!(rendered.contains("$3.000.000"));

        let chart = format_bar_chart(&result, "$", 10, 8);
        assert!(chart.contains("North"));
        assert!(chart.contains("$3"));
    }
}
