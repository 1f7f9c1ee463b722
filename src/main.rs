use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;

use budget_dashboard::cli::{
    handle_cache_command, handle_export_command, handle_report_command, CacheCommands,
    CliContext, ExportArgs, ReportCommands,
};
use budget_dashboard::config::{BudgetPaths, Settings};
use budget_dashboard::logging::init_tracing;

#[derive(Parser)]
#[command(
    name = "budgetdash",
    version,
    about = "Budget file dashboard with Pareto cost-center analysis",
    long_about = "budgetdash reads a semicolon-delimited budget file and reports \
                  income and expense KPIs, breakdowns by category and area, and \
                  the cost centers that make up 80% of the spending."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Parse the budget file from scratch, ignoring the cache
    #[arg(long, global = true)]
    no_cache: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Report commands
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export the dashboard to a file
    Export(ExportArgs),

    /// Parse cache commands
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Show current configuration and paths
    Config {
        /// Write the settings file with defaults if it does not exist
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = BudgetPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    debug!(base_dir = %paths.base_dir().display(), "configuration loaded");

    let ctx = CliContext::new(paths, settings, !cli.no_cache);

    match cli.command {
        Some(Commands::Report(cmd)) => handle_report_command(&ctx, cmd)?,
        Some(Commands::Export(args)) => handle_export_command(&ctx, args)?,
        Some(Commands::Cache(cmd)) => handle_cache_command(&ctx, cmd)?,
        Some(Commands::Config { init }) => {
            if init && !ctx.paths.settings_file().exists() {
                ctx.settings.save(&ctx.paths)?;
                println!("Wrote default settings to {}", ctx.paths.settings_file().display());
                println!();
            }

            println!("budget-dashboard Configuration");
            println!("==============================");
            println!("Base directory:  {}", ctx.paths.base_dir().display());
            println!("Settings file:   {}", ctx.paths.settings_file().display());
            println!("Cache directory: {}", ctx.paths.cache_dir().display());
            println!();
            println!("Settings:");
            println!("{}", serde_json::to_string_pretty(&ctx.settings)?);
        }
        None => {
            println!("budgetdash - budget dashboard and Pareto analysis");
            println!();
            println!("Run 'budgetdash --help' for usage information.");
            println!("Run 'budgetdash report dashboard <FILE>' to analyse a budget file.");
        }
    }

    Ok(())
}
