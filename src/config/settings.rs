//! User settings for budget-dashboard
//!
//! Column names, type labels, the exclusion policy and the analysis knobs all
//! live here so that a different spreadsheet layout or a policy change never
//! requires touching the aggregation engine.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::paths::BudgetPaths;
use crate::error::BudgetError;
use crate::services::exclusion::ExclusionRule;
use crate::services::pareto::ParetoOptions;
use crate::services::prepare::ParseOptions;

/// Header names of the required input columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnNames {
    #[serde(default = "default_type_column")]
    pub record_type: String,
    #[serde(default = "default_category_column")]
    pub category: String,
    #[serde(default = "default_area_column")]
    pub area: String,
    #[serde(default = "default_amount_column")]
    pub amount: String,
    #[serde(default = "default_cost_center_column")]
    pub cost_center: String,
}

fn default_type_column() -> String {
    "Type".to_string()
}

fn default_category_column() -> String {
    "Category".to_string()
}

fn default_area_column() -> String {
    "Area".to_string()
}

fn default_amount_column() -> String {
    "Amount-2025".to_string()
}

fn default_cost_center_column() -> String {
    "Cost-Center-Name".to_string()
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            record_type: default_type_column(),
            category: default_category_column(),
            area: default_area_column(),
            amount: default_amount_column(),
            cost_center: default_cost_center_column(),
        }
    }
}

impl ColumnNames {
    /// All required names, in reporting order
    pub fn required(&self) -> [&str; 5] {
        [
            &self.record_type,
            &self.category,
            &self.area,
            &self.amount,
            &self.cost_center,
        ]
    }
}

/// Labels recognised in the type column, and the "no filter" selection label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    #[serde(default = "default_income_label")]
    pub income: String,
    #[serde(default = "default_expense_label")]
    pub expense: String,
    #[serde(default = "default_general_label")]
    pub general: String,
}

fn default_income_label() -> String {
    "Income".to_string()
}

fn default_expense_label() -> String {
    "Expense".to_string()
}

fn default_general_label() -> String {
    "General".to_string()
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            income: default_income_label(),
            expense: default_expense_label(),
            general: default_general_label(),
        }
    }
}

/// User settings for budget-dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Budget file used when a command is given no path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_input: Option<PathBuf>,

    /// Field delimiter of the budget file
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Currency symbol stripped from amounts and used for display
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    #[serde(default)]
    pub columns: ColumnNames,

    #[serde(default)]
    pub labels: Labels,

    /// Records siphoned out of the consolidated view
    #[serde(default = "default_exclusions")]
    pub exclusions: Vec<ExclusionRule>,

    #[serde(default)]
    pub pareto: ParetoOptions,

    /// Number of income categories shown in the category breakdown
    #[serde(default = "default_income_top_n")]
    pub income_top_n: usize,

    /// Number of expense categories shown in the category breakdown
    #[serde(default = "default_expense_top_n")]
    pub expense_top_n: usize,

    /// Width at which long chart labels are wrapped
    #[serde(default = "default_label_wrap_width")]
    pub label_wrap_width: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_delimiter() -> char {
    ';'
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_exclusions() -> Vec<ExclusionRule> {
    vec![ExclusionRule::default()]
}

fn default_income_top_n() -> usize {
    6
}

fn default_expense_top_n() -> usize {
    5
}

fn default_label_wrap_width() -> usize {
    25
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_input: None,
            delimiter: default_delimiter(),
            currency_symbol: default_currency(),
            columns: ColumnNames::default(),
            labels: Labels::default(),
            exclusions: default_exclusions(),
            pareto: ParetoOptions::default(),
            income_top_n: default_income_top_n(),
            expense_top_n: default_expense_top_n(),
            label_wrap_width: default_label_wrap_width(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &BudgetPaths) -> Result<Self, BudgetError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                BudgetError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BudgetError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetPaths) -> Result<(), BudgetError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            BudgetError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BudgetError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject settings the analysis cannot run with
    pub fn validate(&self) -> Result<(), BudgetError> {
        if self.pareto.threshold <= Decimal::ZERO || self.pareto.threshold > Decimal::ONE {
            return Err(BudgetError::Validation(format!(
                "Pareto threshold must be in (0, 1], got {}",
                self.pareto.threshold
            )));
        }

        if self.columns.required().iter().any(|c| c.trim().is_empty()) {
            return Err(BudgetError::Validation(
                "Column names must not be empty".into(),
            ));
        }

        if self.labels.income == self.labels.expense {
            return Err(BudgetError::Validation(format!(
                "Income and expense labels must differ (both '{}')",
                self.labels.income
            )));
        }

        Ok(())
    }

    /// Options used to parse the budget file
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            delimiter: self.delimiter,
            currency_symbol: self.currency_symbol.clone(),
            columns: self.columns.clone(),
            labels: self.labels.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.delimiter, ';');
        assert_eq!(settings.columns.amount, "Amount-2025");
        assert_eq!(settings.labels.general, "General");
        assert_eq!(settings.pareto.threshold, dec!(0.80));
        assert_eq!(settings.income_top_n, 6);
        assert_eq!(settings.expense_top_n, 5);
        assert_eq!(settings.exclusions.len(), 1);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency_symbol = "€".into();
        settings.expense_top_n = 3;
        settings.exclusions.clear();

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.expense_top_n, 3);
        assert!(loaded.exclusions.is_empty());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"income_top_n": 4}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.income_top_n, 4);
        assert_eq!(loaded.delimiter, ';');
        assert_eq!(loaded.exclusions, vec![ExclusionRule::default()]);
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        let mut settings = Settings::default();
        settings.pareto.threshold = dec!(1.5);
        assert!(settings.validate().unwrap_err().is_validation());

        settings.pareto.threshold = dec!(0);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_same_labels() {
        let mut settings = Settings::default();
        settings.labels.expense = settings.labels.income.clone();
        assert!(settings.validate().is_err());
    }
}
