//! CLI commands for the parse cache

use clap::Subcommand;

use crate::cli::CliContext;
use crate::error::BudgetResult;
use crate::storage::TableCache;

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Remove every cached parse
    Clear,

    /// Show where the cache lives
    Info,
}

/// Handle cache commands
pub fn handle_cache_command(ctx: &CliContext, cmd: CacheCommands) -> BudgetResult<()> {
    let cache = TableCache::new(ctx.paths.cache_dir());

    match cmd {
        CacheCommands::Clear => {
            let removed = cache.clear()?;
            println!("Removed {} cache entr{}", removed, if removed == 1 { "y" } else { "ies" });
        }
        CacheCommands::Info => {
            println!("Cache directory: {}", cache.dir().display());
            println!("Enabled: {}", ctx.use_cache);
        }
    }

    Ok(())
}
