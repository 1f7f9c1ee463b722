//! Grouping and summing of budget records
//!
//! Aggregation is a strict equality partition on one dimension with an
//! additive sum, so the group totals always add up to the input total.
//! Groups keep the order in which their key first appears in the table; that
//! order is also the tie-break for every sort below.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Amount, BudgetRecord, BudgetTable};

/// Field a table is grouped by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Category,
    Area,
    CostCenter,
}

impl Dimension {
    /// The grouping key of a record
    pub fn key<'a>(&self, record: &'a BudgetRecord) -> &'a str {
        match self {
            Self::Category => &record.category,
            Self::Area => &record.area,
            Self::CostCenter => &record.cost_center,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Area => "Area",
            Self::CostCenter => "Cost Center",
        }
    }
}

/// Summed amount of one group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupTotal {
    pub key: String,
    pub amount: Amount,
    /// Number of records in the group
    pub count: usize,
}

/// Group totals for one dimension, keys unique
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub dimension: Dimension,
    pub groups: Vec<GroupTotal>,
}

/// Group `table` by `dimension` and sum the amounts
pub fn aggregate(table: &BudgetTable, dimension: Dimension) -> AggregationResult {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<GroupTotal> = Vec::new();

    for record in table {
        let key = dimension.key(record);
        match index.get(key).copied() {
            Some(i) => {
                groups[i].amount += record.amount;
                groups[i].count += 1;
            }
            None => {
                index.insert(key, groups.len());
                groups.push(GroupTotal {
                    key: key.to_string(),
                    amount: record.amount,
                    count: 1,
                });
            }
        }
    }

    AggregationResult { dimension, groups }
}

impl AggregationResult {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GroupTotal> {
        self.groups.iter()
    }

    /// Summed amount of one key
    pub fn get(&self, key: &str) -> Option<Amount> {
        self.groups.iter().find(|g| g.key == key).map(|g| g.amount)
    }

    /// Sum over all groups
    pub fn total(&self) -> Amount {
        self.groups.iter().map(|g| g.amount).sum()
    }

    /// Largest group amount, if any
    pub fn max_amount(&self) -> Option<Amount> {
        self.groups.iter().map(|g| g.amount).max()
    }

    /// The `n` largest groups, descending; ties keep first-seen order
    pub fn top_n(&self, n: usize) -> Self {
        let mut sorted = self.sorted_descending();
        sorted.groups.truncate(n);
        sorted
    }

    /// Drop groups whose total is zero or negative (chart display filter)
    pub fn positive_only(&self) -> Self {
        Self {
            dimension: self.dimension,
            groups: self
                .groups
                .iter()
                .filter(|g| g.amount.is_positive())
                .cloned()
                .collect(),
        }
    }

    /// Stable sort, smallest first (horizontal bar charts)
    pub fn sorted_ascending(&self) -> Self {
        let mut groups = self.groups.clone();
        groups.sort_by(|a, b| a.amount.cmp(&b.amount));
        Self {
            dimension: self.dimension,
            groups,
        }
    }

    /// Stable sort, largest first
    pub fn sorted_descending(&self) -> Self {
        let mut groups = self.groups.clone();
        groups.sort_by(|a, b| b.amount.cmp(&a.amount));
        Self {
            dimension: self.dimension,
            groups,
        }
    }
}

impl<'a> IntoIterator for &'a AggregationResult {
    type Item = &'a GroupTotal;
    type IntoIter = std::slice::Iter<'a, GroupTotal>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}
