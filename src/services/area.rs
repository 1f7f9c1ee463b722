//! Area selection
//!
//! Resolves the user's area filter against the areas actually present in the
//! full table and scopes the prepared budget accordingly.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BudgetError, BudgetResult};
use crate::models::BudgetTable;
use crate::services::exclusion::PreparedBudget;

/// Literal accepted as a synonym of the general label
pub const ALL_SENTINEL: &str = "All";

/// Which slice of the budget a report covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "scope", content = "area")]
pub enum AreaSelection {
    /// Consolidated view (excluded records removed)
    General,
    /// One area, including its excluded records
    Area(String),
}

impl AreaSelection {
    /// Resolve a filter value against the known areas
    ///
    /// `None`, the general label and `All` (case-insensitive) select the
    /// consolidated view. Any other value must match an area exactly.
    pub fn resolve(
        input: Option<&str>,
        full: &BudgetTable,
        general_label: &str,
    ) -> BudgetResult<Self> {
        let value = match input.map(str::trim) {
            None => return Ok(Self::General),
            Some(v) => v,
        };

        if value.eq_ignore_ascii_case(general_label) || value.eq_ignore_ascii_case(ALL_SENTINEL) {
            return Ok(Self::General);
        }

        let known = full.areas();
        if known.iter().any(|a| a == value) {
            debug!(area = value, "area selected");
            Ok(Self::Area(value.to_string()))
        } else {
            Err(BudgetError::unknown_area(value, known))
        }
    }

    /// The records this selection covers
    pub fn scope(&self, prepared: &PreparedBudget) -> BudgetTable {
        match self {
            Self::General => prepared.main.clone(),
            Self::Area(area) => prepared.full.in_area(area),
        }
    }

    pub fn is_general(&self) -> bool {
        matches!(self, Self::General)
    }

    /// Display label, using the configured general label
    pub fn label<'a>(&'a self, general_label: &'a str) -> &'a str {
        match self {
            Self::General => general_label,
            Self::Area(area) => area,
        }
    }
}

/// Selectable values: the general label followed by the sorted areas
///
/// Built from the full table so that areas whose records are all excluded
/// from the consolidated view can still be selected.
pub fn area_options(full: &BudgetTable, general_label: &str) -> Vec<String> {
    let mut options = vec![general_label.to_string()];
    options.extend(full.areas());
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, BudgetRecord, RecordType};
    use crate::services::exclusion::{split_exclusions, ExclusionRule, DEFAULT_EXCLUDED_AREA};
    use rust_decimal_macros::dec;

    fn prepared() -> PreparedBudget {
        split_exclusions(
            BudgetTable::new(vec![
                BudgetRecord::income("Grants", DEFAULT_EXCLUDED_AREA, "CC-1", Amount::new(dec!(500))),
                BudgetRecord::expense("Lab", DEFAULT_EXCLUDED_AREA, "CC-2", Amount::new(dec!(200))),
                BudgetRecord::income("Sales", "Commercial", "CC-3", Amount::new(dec!(1000))),
            ]),
            &[ExclusionRule::default()],
        )
    }

    #[test]
    fn test_resolve_general() {
        let prepared = prepared();
        for input in [None, Some("General"), Some("general"), Some("All"), Some(" ALL ")] {
            assert_eq!(
                AreaSelection::resolve(input, &prepared.full, "General").unwrap(),
                AreaSelection::General
            );
        }
    }

    #[test]
    fn test_resolve_known_area() {
        let prepared = prepared();
        let selection =
            AreaSelection::resolve(Some("Commercial"), &prepared.full, "General").unwrap();
        assert_eq!(selection, AreaSelection::Area("Commercial".into()));
        assert_eq!(selection.label("General"), "Commercial");
    }

    #[test]
    fn test_resolve_unknown_area_is_error() {
        let prepared = prepared();
        let err = AreaSelection::resolve(Some("commercial"), &prepared.full, "General")
            .unwrap_err();
        match err {
            BudgetError::UnknownArea { area, known } => {
                assert_eq!(area, "commercial");
                assert_eq!(known, vec!["Commercial", DEFAULT_EXCLUDED_AREA]);
            }
            other => panic!("expected unknown area, got {other:?}"),
        }
    }

    #[test]
    fn test_scope_uses_the_right_view() {
        let prepared = prepared();

        let general = AreaSelection::General.scope(&prepared);
        assert_eq!(general.total_of(&RecordType::Income), Amount::new(dec!(1000)));

        let area = AreaSelection::Area(DEFAULT_EXCLUDED_AREA.into()).scope(&prepared);
        assert_eq!(area.len(), 2);
        assert_eq!(area.total_of(&RecordType::Income), Amount::new(dec!(500)));
    }

    #[test]
    fn test_area_options_include_excluded_areas() {
        let prepared = prepared();
        assert_eq!(
            area_options(&prepared.full, "General"),
            vec!["General", "Commercial", DEFAULT_EXCLUDED_AREA]
        );
    }
}
