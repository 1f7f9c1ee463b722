//! Pareto (80/20) concentration analysis
//!
//! Finds the shortest prefix of the value-descending expense lines whose
//! cumulative amount reaches the threshold share (80% by default) of the
//! analysed total. Payroll is left out: a single dominant payroll line would
//! reach the threshold on its own and hide the concentration among the other
//! cost centers.
//!
//! The sort is stable, so cost centers tied at the cutoff are included in
//! the order they appear in the source file.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Amount, BudgetRecord, BudgetTable};

/// Category excluded from the analysis by default
pub const DEFAULT_EXCLUDED_CATEGORY: &str = "Personnel";

/// Tuning of the Pareto cut
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParetoOptions {
    /// Share of the total the prefix must reach, in (0, 1]
    #[serde(default = "default_threshold")]
    pub threshold: Decimal,

    /// Category left out of the analysis (payroll)
    #[serde(default = "default_excluded_category")]
    pub excluded_category: String,
}

fn default_threshold() -> Decimal {
    Decimal::new(80, 2)
}

fn default_excluded_category() -> String {
    DEFAULT_EXCLUDED_CATEGORY.to_string()
}

impl Default for ParetoOptions {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            excluded_category: default_excluded_category(),
        }
    }
}

impl ParetoOptions {
    /// Whether a record takes part in the analysis
    pub fn is_candidate(&self, record: &BudgetRecord) -> bool {
        record.record_type.is_expense()
            && record.category != self.excluded_category
            && record.amount.is_positive()
    }
}

/// One cost-center line of the Pareto prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParetoEntry {
    pub cost_center: String,
    pub amount: Amount,
    /// Sum of this entry and every entry before it
    pub cumulative_amount: Amount,
}

/// Result of a Pareto analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParetoAnalysis {
    /// The shortest prefix reaching the target
    pub entries: Vec<ParetoEntry>,
    /// Sum of all candidate lines
    pub total: Amount,
    /// `threshold * total`
    pub target: Amount,
    pub threshold: Decimal,
    /// Number of lines that passed the filter
    pub candidate_count: usize,
}

impl ParetoAnalysis {
    /// Run the analysis over `table`
    pub fn compute(table: &BudgetTable, options: &ParetoOptions) -> Self {
        let mut candidates: Vec<&BudgetRecord> =
            table.iter().filter(|r| options.is_candidate(r)).collect();

        if candidates.is_empty() {
            debug!("no expense lines to analyse");
            return Self {
                entries: Vec::new(),
                total: Amount::zero(),
                target: Amount::zero(),
                threshold: options.threshold,
                candidate_count: 0,
            };
        }

        // slice::sort_by is stable
        candidates.sort_by(|a, b| b.amount.cmp(&a.amount));

        let total: Amount = candidates.iter().map(|r| r.amount).sum();
        let target = total.scale(options.threshold);

        let mut entries = Vec::new();
        let mut cumulative = Amount::zero();
        for record in &candidates {
            cumulative += record.amount;
            entries.push(ParetoEntry {
                cost_center: record.cost_center.clone(),
                amount: record.amount,
                cumulative_amount: cumulative,
            });
            if cumulative >= target {
                break;
            }
        }

        debug!(
            candidates = candidates.len(),
            selected = entries.len(),
            total = %total,
            target = %target,
            "pareto cut computed"
        );

        Self {
            entries,
            total,
            target,
            threshold: options.threshold,
            candidate_count: candidates.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cumulative amount of the whole prefix
    pub fn covered(&self) -> Amount {
        self.entries
            .last()
            .map(|e| e.cumulative_amount)
            .unwrap_or_default()
    }

    /// Share of the total covered by the prefix, in [0, 1]
    pub fn coverage(&self) -> Decimal {
        self.covered().share_of(self.total)
    }

    /// Share of the total represented by one entry
    pub fn share_of(&self, entry: &ParetoEntry) -> Decimal {
        entry.amount.share_of(self.total)
    }
}

/// Pareto prefix with the default 80% threshold and payroll excluded
pub fn compute_pareto(table: &BudgetTable) -> Vec<ParetoEntry> {
    ParetoAnalysis::compute(table, &ParetoOptions::default()).entries
}
