//! Headline figures: total income, total expense and net result

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Amount, BudgetTable, RecordType};

/// Scalar KPIs of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpis {
    pub total_income: Amount,
    pub total_expense: Amount,
    /// Income minus expense; may be negative
    pub net_result: Decimal,
}

impl Kpis {
    pub fn compute(table: &BudgetTable) -> Self {
        let total_income = table.total_of(&RecordType::Income);
        let total_expense = table.total_of(&RecordType::Expense);

        Self {
            total_income,
            total_expense,
            net_result: total_income.value() - total_expense.value(),
        }
    }
}
