//! Budget line items
//!
//! One `BudgetRecord` per accepted source row. Text fields are already
//! trimmed and defaulted to [`NOT_AVAILABLE`] by preparation.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Amount;

/// Sentinel used for missing or empty categorical fields
pub const NOT_AVAILABLE: &str = "N/A";

/// Whether a line item is income or expense
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "label")]
pub enum RecordType {
    Income,
    Expense,
    /// A type label that is neither the income nor the expense label
    Unclassified(String),
}

impl RecordType {
    /// Classify a trimmed type label against the configured labels
    pub fn classify(label: &str, income_label: &str, expense_label: &str) -> Self {
        if label == income_label {
            Self::Income
        } else if label == expense_label {
            Self::Expense
        } else {
            Self::Unclassified(label.to_string())
        }
    }

    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income)
    }

    pub fn is_expense(&self) -> bool {
        matches!(self, Self::Expense)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
            Self::Unclassified(label) => write!(f, "{}", label),
        }
    }
}

/// A single budget line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetRecord {
    pub record_type: RecordType,
    pub category: String,
    pub area: String,
    pub cost_center: String,
    pub amount: Amount,
}

impl BudgetRecord {
    /// Create a record, normalizing the text fields
    pub fn new(
        record_type: RecordType,
        category: impl AsRef<str>,
        area: impl AsRef<str>,
        cost_center: impl AsRef<str>,
        amount: Amount,
    ) -> Self {
        Self {
            record_type,
            category: normalize_text(category.as_ref()),
            area: normalize_text(area.as_ref()),
            cost_center: normalize_text(cost_center.as_ref()),
            amount,
        }
    }

    /// Convenience constructor for an expense line
    pub fn expense(
        category: impl AsRef<str>,
        area: impl AsRef<str>,
        cost_center: impl AsRef<str>,
        amount: Amount,
    ) -> Self {
        Self::new(RecordType::Expense, category, area, cost_center, amount)
    }

    /// Convenience constructor for an income line
    pub fn income(
        category: impl AsRef<str>,
        area: impl AsRef<str>,
        cost_center: impl AsRef<str>,
        amount: Amount,
    ) -> Self {
        Self::new(RecordType::Income, category, area, cost_center, amount)
    }
}

/// Trim a categorical value, defaulting empty text to [`NOT_AVAILABLE`]
pub fn normalize_text(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_classify() {
        assert_eq!(
            RecordType::classify("Income", "Income", "Expense"),
            RecordType::Income
        );
        assert_eq!(
            RecordType::classify("Expense", "Income", "Expense"),
            RecordType::Expense
        );
        assert_eq!(
            RecordType::classify("Transfer", "Income", "Expense"),
            RecordType::Unclassified("Transfer".into())
        );
        // Labels are case-sensitive
        assert!(!RecordType::classify("income", "Income", "Expense").is_income());
    }

    #[test]
    fn test_new_normalizes_text() {
        let record = BudgetRecord::expense("  Ops ", "", "  CC-1", Amount::new(dec!(10)));
        assert_eq!(record.category, "Ops");
        assert_eq!(record.area, NOT_AVAILABLE);
        assert_eq!(record.cost_center, "CC-1");
    }

    #[test]
    fn test_serde_round_trip() {
        let record = BudgetRecord::income("Sales", "North", "CC-9", Amount::new(dec!(12.5)));
        let json = serde_json::to_string(&record).unwrap();
        let back: BudgetRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
