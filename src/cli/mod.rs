//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod cache;
pub mod export;
pub mod report;

use std::path::Path;

use crate::config::{BudgetPaths, Settings};
use crate::error::BudgetResult;
use crate::services::{AreaSelection, BudgetLoader, LoadedBudget};

pub use cache::{handle_cache_command, CacheCommands};
pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use report::{handle_report_command, ReportCommands};

/// Everything a command needs besides its own arguments
pub struct CliContext {
    pub paths: BudgetPaths,
    pub settings: Settings,
    /// Use the parse cache when loading
    pub use_cache: bool,
}

impl CliContext {
    pub fn new(paths: BudgetPaths, settings: Settings, use_cache: bool) -> Self {
        Self {
            paths,
            settings,
            use_cache,
        }
    }

    fn loader<'a>(&'a self, settings: &'a Settings) -> BudgetLoader<'a> {
        if self.use_cache {
            BudgetLoader::new(&self.paths, settings)
        } else {
            BudgetLoader::uncached(settings)
        }
    }

    /// Load the budget file and resolve the area filter against it
    pub fn load(
        &self,
        file: Option<&Path>,
        area: Option<&str>,
    ) -> BudgetResult<(LoadedBudget, AreaSelection)> {
        self.load_with(&self.settings, file, area)
    }

    /// Same as [`CliContext::load`], with settings overridden by the caller
    pub fn load_with(
        &self,
        settings: &Settings,
        file: Option<&Path>,
        area: Option<&str>,
    ) -> BudgetResult<(LoadedBudget, AreaSelection)> {
        let loader = self.loader(settings);
        let path = loader.resolve_input(file)?;
        let loaded = loader.load(&path)?;
        report_issues(&loaded);

        let selection =
            AreaSelection::resolve(area, &loaded.prepared.full, &settings.labels.general)?;
        Ok((loaded, selection))
    }
}

/// One-line summary of recovered parse problems, on stderr
fn report_issues(loaded: &LoadedBudget) {
    if loaded.issues.is_empty() {
        return;
    }

    eprintln!(
        "Note: {}: {} malformed line(s) skipped, {} value(s) set to zero",
        loaded.source_name(),
        loaded.skipped_lines(),
        loaded.zeroed_values()
    );
}
