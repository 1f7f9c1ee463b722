//! Service layer for budget-dashboard
//!
//! The pipeline runs prepare -> exclusion -> area scope, and the analyses
//! (aggregation, Pareto, KPIs) are pure functions over the resulting tables.

pub mod aggregate;
pub mod area;
pub mod exclusion;
pub mod kpi;
pub mod loader;
pub mod pareto;
pub mod prepare;

pub use aggregate::{aggregate, AggregationResult, Dimension, GroupTotal};
pub use area::{area_options, AreaSelection};
pub use exclusion::{split_exclusions, ExcludedKind, ExclusionRule, PreparedBudget};
pub use kpi::Kpis;
pub use loader::{BudgetLoader, LoadedBudget};
pub use pareto::{compute_pareto, ParetoAnalysis, ParetoEntry, ParetoOptions};
pub use prepare::{
    prepare_file, prepare_table, ParseIssue, ParseIssueKind, ParseOptions, PreparationOutcome,
};
