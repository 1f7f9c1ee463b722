//! Ordered collection of budget records
//!
//! Insertion order is source order and is preserved by every filter, since
//! the stable tie-breaks of top-N and Pareto depend on it.

use serde::{Deserialize, Serialize};

use super::{Amount, BudgetRecord, RecordType};

/// An ordered, immutable-by-convention set of budget records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BudgetTable {
    records: Vec<BudgetRecord>,
}

impl BudgetTable {
    pub fn new(records: Vec<BudgetRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[BudgetRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BudgetRecord> {
        self.records.iter()
    }

    /// Keep the records matching `predicate`, preserving order
    pub fn filter<F>(&self, predicate: F) -> BudgetTable
    where
        F: Fn(&BudgetRecord) -> bool,
    {
        Self::new(self.records.iter().filter(|r| predicate(r)).cloned().collect())
    }

    /// Split into (matching, rest), both preserving order
    pub fn partition<F>(&self, predicate: F) -> (BudgetTable, BudgetTable)
    where
        F: Fn(&BudgetRecord) -> bool,
    {
        let (matching, rest): (Vec<_>, Vec<_>) =
            self.records.iter().cloned().partition(|r| predicate(r));
        (Self::new(matching), Self::new(rest))
    }

    /// Records of one type
    pub fn of_type(&self, record_type: &RecordType) -> BudgetTable {
        self.filter(|r| &r.record_type == record_type)
    }

    /// Records of one area (exact match)
    pub fn in_area(&self, area: &str) -> BudgetTable {
        self.filter(|r| r.area == area)
    }

    /// Sum of all amounts
    pub fn total(&self) -> Amount {
        self.records.iter().map(|r| r.amount).sum()
    }

    /// Sum of the amounts of one type
    pub fn total_of(&self, record_type: &RecordType) -> Amount {
        self.records
            .iter()
            .filter(|r| &r.record_type == record_type)
            .map(|r| r.amount)
            .sum()
    }

    /// Sorted unique areas
    pub fn areas(&self) -> Vec<String> {
        let mut areas: Vec<String> = self.records.iter().map(|r| r.area.clone()).collect();
        areas.sort();
        areas.dedup();
        areas
    }
}

impl From<Vec<BudgetRecord>> for BudgetTable {
    fn from(records: Vec<BudgetRecord>) -> Self {
        Self::new(records)
    }
}

impl<'a> IntoIterator for &'a BudgetTable {
    type Item = &'a BudgetRecord;
    type IntoIter = std::slice::Iter<'a, BudgetRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> BudgetTable {
        BudgetTable::new(vec![
            BudgetRecord::income("Sales", "North", "CC-1", Amount::new(dec!(1000))),
            BudgetRecord::expense("Ops", "South", "CC-2", Amount::new(dec!(400))),
            BudgetRecord::expense("Ops", "North", "CC-3", Amount::new(dec!(250))),
        ])
    }

    #[test]
    fn test_totals() {
        let table = sample();
        assert_eq!(table.total(), Amount::new(dec!(1650)));
        assert_eq!(table.total_of(&RecordType::Income), Amount::new(dec!(1000)));
        assert_eq!(table.total_of(&RecordType::Expense), Amount::new(dec!(650)));
    }

    #[test]
    fn test_filters_preserve_order() {
        let table = sample();
        let north = table.in_area("North");
        assert_eq!(north.len(), 2);
        assert_eq!(north.records()[0].cost_center, "CC-1");
        assert_eq!(north.records()[1].cost_center, "CC-3");

        let (expenses, rest) = table.partition(|r| r.record_type.is_expense());
        assert_eq!(expenses.len(), 2);
        assert_eq!(rest.len(), 1);
    }

    #[test]
    fn test_areas_sorted_unique() {
        assert_eq!(sample().areas(), vec!["North".to_string(), "South".to_string()]);
    }
}
