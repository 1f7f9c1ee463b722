//! CLI commands for reports
//!
//! Dashboard, Pareto, breakdown and area listing views of a budget file.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};
use rust_decimal::Decimal;

use crate::cli::CliContext;
use crate::display::{format_amount, format_group_table};
use crate::error::{BudgetError, BudgetResult};
use crate::models::RecordType;
use crate::reports::{format_pareto_section, DashboardReport};
use crate::services::{aggregate, Dimension, ParetoAnalysis};

/// Record type shown by a breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BreakdownKind {
    Income,
    Expense,
}

/// Grouping of a breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GroupBy {
    Category,
    Area,
    CostCenter,
}

impl From<GroupBy> for Dimension {
    fn from(by: GroupBy) -> Self {
        match by {
            GroupBy::Category => Dimension::Category,
            GroupBy::Area => Dimension::Area,
            GroupBy::CostCenter => Dimension::CostCenter,
        }
    }
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Full dashboard: KPIs, breakdowns and (for an area) the Pareto cut
    Dashboard {
        /// Budget file (defaults to `default_input` from the settings)
        file: Option<PathBuf>,

        /// Area to report on ("General" or "All" for the consolidated view)
        #[arg(short, long)]
        area: Option<String>,

        /// Show the Pareto table for the consolidated view too
        #[arg(long)]
        pareto: bool,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Cost centers making up the bulk of expenses
    Pareto {
        /// Budget file (defaults to `default_input` from the settings)
        file: Option<PathBuf>,

        /// Area to report on
        #[arg(short, long)]
        area: Option<String>,

        /// Share of the total to cover, in (0, 1]
        #[arg(short, long)]
        threshold: Option<Decimal>,
    },

    /// Totals of one record type grouped by category, area or cost center
    Breakdown {
        /// Budget file (defaults to `default_input` from the settings)
        file: Option<PathBuf>,

        /// Record type to break down
        #[arg(short, long, value_enum)]
        kind: BreakdownKind,

        /// Grouping dimension
        #[arg(short, long, value_enum, default_value = "category")]
        by: GroupBy,

        /// Show top N groups only
        #[arg(long)]
        top: Option<usize>,

        /// Area to report on
        #[arg(short, long)]
        area: Option<String>,
    },

    /// List the selectable areas
    Areas {
        /// Budget file (defaults to `default_input` from the settings)
        file: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(ctx: &CliContext, cmd: ReportCommands) -> BudgetResult<()> {
    match cmd {
        ReportCommands::Dashboard {
            file,
            area,
            pareto,
            output,
        } => handle_dashboard_report(ctx, file, area, pareto, output),
        ReportCommands::Pareto {
            file,
            area,
            threshold,
        } => handle_pareto_report(ctx, file, area, threshold),
        ReportCommands::Breakdown {
            file,
            kind,
            by,
            top,
            area,
        } => handle_breakdown_report(ctx, file, kind, by, top, area),
        ReportCommands::Areas { file } => handle_areas_report(ctx, file),
    }
}

/// Handle the dashboard report
fn handle_dashboard_report(
    ctx: &CliContext,
    file: Option<PathBuf>,
    area: Option<String>,
    show_pareto: bool,
    output: Option<PathBuf>,
) -> BudgetResult<()> {
    let (loaded, selection) = ctx.load(file.as_deref(), area.as_deref())?;
    let report = DashboardReport::generate(
        &loaded.prepared,
        &selection,
        &ctx.settings,
        &loaded.source_name(),
    );

    if let Some(output_path) = output {
        let file = File::create(&output_path)
            .map_err(|e| BudgetError::Export(format!("Failed to create file: {}", e)))?;
        let mut writer = BufWriter::new(file);
        report.export_csv(&mut writer)?;
        println!("Report exported to: {}", output_path.display());
    } else {
        print!("{}", report.format_terminal(&ctx.settings, show_pareto));
    }

    Ok(())
}

/// Handle the Pareto report
fn handle_pareto_report(
    ctx: &CliContext,
    file: Option<PathBuf>,
    area: Option<String>,
    threshold: Option<Decimal>,
) -> BudgetResult<()> {
    let mut settings = ctx.settings.clone();
    if let Some(threshold) = threshold {
        settings.pareto.threshold = threshold;
        settings.validate()?;
    }

    let (loaded, selection) = ctx.load_with(&settings, file.as_deref(), area.as_deref())?;
    let pareto = ParetoAnalysis::compute(&selection.scope(&loaded.prepared), &settings.pareto);

    println!(
        "{}: {}",
        loaded.source_name(),
        selection.label(&settings.labels.general)
    );
    print!("{}", format_pareto_section(&pareto, &settings.currency_symbol));
    Ok(())
}

/// Handle the breakdown report
fn handle_breakdown_report(
    ctx: &CliContext,
    file: Option<PathBuf>,
    kind: BreakdownKind,
    by: GroupBy,
    top: Option<usize>,
    area: Option<String>,
) -> BudgetResult<()> {
    let (loaded, selection) = ctx.load(file.as_deref(), area.as_deref())?;
    let scope = selection.scope(&loaded.prepared);

    let record_type = match kind {
        BreakdownKind::Income => RecordType::Income,
        BreakdownKind::Expense => RecordType::Expense,
    };
    let mut result = aggregate(&scope.of_type(&record_type), by.into()).sorted_descending();
    if let Some(n) = top {
        result = result.top_n(n);
    }

    println!(
        "{} by {} ({})",
        record_type,
        result.dimension.label(),
        selection.label(&ctx.settings.labels.general)
    );

    if result.is_empty() {
        println!("No {} records.", record_type);
        return Ok(());
    }

    println!("{}", format_group_table(&result, &ctx.settings.currency_symbol));
    println!(
        "Total: {}",
        format_amount(result.total().value(), &ctx.settings.currency_symbol)
    );
    Ok(())
}

/// Handle the area listing
fn handle_areas_report(ctx: &CliContext, file: Option<PathBuf>) -> BudgetResult<()> {
    let (loaded, _) = ctx.load(file.as_deref(), None)?;
    let full = &loaded.prepared.full;

    println!(
        "{} (consolidated view, {} record(s))",
        ctx.settings.labels.general,
        loaded.prepared.main.len()
    );
    for area in full.areas() {
        println!("{} ({} record(s))", area, full.in_area(&area).len());
    }

    Ok(())
}
