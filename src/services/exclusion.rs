//! Side-channel exclusion policy
//!
//! Some records must not inflate the consolidated KPIs yet must stay visible
//! when their area is inspected directly. Each such policy is an
//! [`ExclusionRule`] in the settings; [`split_exclusions`] applies them and
//! produces the two views of the same source table.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::{Amount, BudgetRecord, BudgetTable, RecordType};

/// Area whose income is kept out of the consolidated view by default
pub const DEFAULT_EXCLUDED_AREA: &str = "Research & Development-Floral";

/// Which record type a rule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExcludedKind {
    Income,
    Expense,
}

impl ExcludedKind {
    pub fn matches(&self, record_type: &RecordType) -> bool {
        match self {
            Self::Income => record_type.is_income(),
            Self::Expense => record_type.is_expense(),
        }
    }
}

/// A named predicate removing records from the consolidated view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionRule {
    /// Exact area name
    pub area: String,
    pub kind: ExcludedKind,
    /// Why the records are excluded, shown in reports
    #[serde(default)]
    pub reason: String,
}

impl Default for ExclusionRule {
    fn default() -> Self {
        Self {
            area: DEFAULT_EXCLUDED_AREA.to_string(),
            kind: ExcludedKind::Income,
            reason: "Exceptional area income, reported separately from consolidated totals"
                .to_string(),
        }
    }
}

impl ExclusionRule {
    pub fn new(area: impl Into<String>, kind: ExcludedKind) -> Self {
        Self {
            area: area.into(),
            kind,
            reason: String::new(),
        }
    }

    pub fn matches(&self, record: &BudgetRecord) -> bool {
        record.area == self.area && self.kind.matches(&record.record_type)
    }
}

/// The source table seen two ways
///
/// `full` keeps every record and backs the per-area views; `main` drops the
/// excluded records and backs the consolidated KPIs and the general view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedBudget {
    pub full: BudgetTable,
    pub main: BudgetTable,
    pub excluded: BudgetTable,
    pub excluded_total: Amount,
}

/// Apply the exclusion rules to a freshly prepared table
pub fn split_exclusions(full: BudgetTable, rules: &[ExclusionRule]) -> PreparedBudget {
    let (excluded, main) = full.partition(|r| rules.iter().any(|rule| rule.matches(r)));
    let excluded_total = excluded.total();

    if !excluded.is_empty() {
        info!(
            records = excluded.len(),
            total = %excluded_total,
            "excluded records from consolidated view"
        );
    }

    PreparedBudget {
        full,
        main,
        excluded,
        excluded_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn table() -> BudgetTable {
        BudgetTable::new(vec![
            BudgetRecord::income("Grants", DEFAULT_EXCLUDED_AREA, "CC-1", Amount::new(dec!(500))),
            BudgetRecord::expense("Lab", DEFAULT_EXCLUDED_AREA, "CC-2", Amount::new(dec!(200))),
            BudgetRecord::income("Sales", "Commercial", "CC-3", Amount::new(dec!(1000))),
            BudgetRecord::income("Grants", DEFAULT_EXCLUDED_AREA, "CC-4", Amount::new(dec!(50))),
        ])
    }

    #[test]
    fn test_default_rule_matches_area_income_only() {
        let rule = ExclusionRule::default();
        let records = table();
        assert!(rule.matches(&records.records()[0]));
        assert!(!rule.matches(&records.records()[1]));
        assert!(!rule.matches(&records.records()[2]));
    }

    #[test]
    fn test_split_keeps_two_views() {
        let prepared = split_exclusions(table(), &[ExclusionRule::default()]);

        assert_eq!(prepared.full.len(), 4);
        assert_eq!(prepared.main.len(), 2);
        assert_eq!(prepared.excluded.len(), 2);
        assert_eq!(prepared.excluded_total, Amount::new(dec!(550)));

        assert_eq!(prepared.main.total_of(&RecordType::Income), Amount::new(dec!(1000)));
        assert_eq!(
            prepared
                .full
                .in_area(DEFAULT_EXCLUDED_AREA)
                .total_of(&RecordType::Income),
            Amount::new(dec!(550))
        );
    }

    #[test]
    fn test_no_rules_keeps_everything() {
        let prepared = split_exclusions(table(), &[]);
        assert_eq!(prepared.main, prepared.full);
        assert!(prepared.excluded.is_empty());
        assert!(prepared.excluded_total.is_zero());
    }

    #[test]
    fn test_rule_serde_lowercase_kind() {
        let rule = ExclusionRule::new("Ops", ExcludedKind::Expense);
        let json = serde_json::to_string(&rule).unwrap();
        assert!(json.contains(r#""kind":"expense""#));
        let back: ExclusionRule = serde_json::from_str(r#"{"area":"Ops","kind":"expense"}"#).unwrap();
        assert_eq!(back, rule);
    }
}
