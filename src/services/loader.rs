//! Budget loading service
//!
//! Ties the pipeline together: parse the file (or reuse the parse cache),
//! then split the excluded records off the consolidated view.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::{BudgetPaths, Settings};
use crate::error::{BudgetError, BudgetResult};
use crate::services::exclusion::{split_exclusions, PreparedBudget};
use crate::services::prepare::{issue_counts, prepare_file, ParseIssue};
use crate::storage::{CacheKey, TableCache};

/// A budget file ready for reporting
#[derive(Debug, Clone)]
pub struct LoadedBudget {
    pub source: PathBuf,
    pub prepared: PreparedBudget,
    /// Problems recovered from while parsing
    pub issues: Vec<ParseIssue>,
    /// Whether the parse came from the cache
    pub from_cache: bool,
}

impl LoadedBudget {
    /// File name used in report headers
    pub fn source_name(&self) -> String {
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source.display().to_string())
    }

    /// Number of lines skipped as malformed
    pub fn skipped_lines(&self) -> usize {
        issue_counts(&self.issues).0
    }

    /// Number of amounts replaced by zero
    pub fn zeroed_values(&self) -> usize {
        issue_counts(&self.issues).1
    }
}

/// Service that turns a budget file into a [`PreparedBudget`]
pub struct BudgetLoader<'a> {
    settings: &'a Settings,
    cache: Option<TableCache>,
}

impl<'a> BudgetLoader<'a> {
    /// Loader using the parse cache under the data directory
    pub fn new(paths: &BudgetPaths, settings: &'a Settings) -> Self {
        Self {
            settings,
            cache: Some(TableCache::new(paths.cache_dir())),
        }
    }

    /// Loader that always parses from scratch
    pub fn uncached(settings: &'a Settings) -> Self {
        Self {
            settings,
            cache: None,
        }
    }

    /// Pick the input file: the explicit path, else the configured default
    pub fn resolve_input(&self, path: Option<&Path>) -> BudgetResult<PathBuf> {
        path.map(Path::to_path_buf)
            .or_else(|| self.settings.default_input.clone())
            .ok_or_else(|| {
                BudgetError::Config(
                    "No budget file given and no default_input configured".into(),
                )
            })
    }

    /// Load and prepare a budget file
    pub fn load(&self, path: &Path) -> BudgetResult<LoadedBudget> {
        let options = self.settings.parse_options();

        let mut from_cache = false;
        let outcome = match &self.cache {
            Some(cache) => {
                let key = CacheKey::for_file(path, &options)?;
                match cache.get(&key) {
                    Some(outcome) => {
                        from_cache = true;
                        outcome
                    }
                    None => {
                        let outcome = prepare_file(path, &options)?;
                        // A cache that cannot be written only costs a re-parse
                        if let Err(e) = cache.put(&key, &outcome) {
                            warn!(error = %e, "failed to store parse cache entry");
                        }
                        outcome
                    }
                }
            }
            None => prepare_file(path, &options)?,
        };

        info!(
            path = %path.display(),
            records = outcome.table.len(),
            issues = outcome.issues.len(),
            cached = from_cache,
            "budget loaded"
        );

        let prepared = split_exclusions(outcome.table, &self.settings.exclusions);

        Ok(LoadedBudget {
            source: path.to_path_buf(),
            prepared,
            issues: outcome.issues,
            from_cache,
        })
    }
}
