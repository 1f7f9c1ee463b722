//! CLI command for dashboard export
//!
//! Writes the dashboard of one selection to a file as JSON, YAML or CSV.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::cli::CliContext;
use crate::error::{BudgetError, BudgetResult};
use crate::export::{export_dashboard_csv, export_dashboard_json, export_dashboard_yaml};
use crate::reports::DashboardReport;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (one row per figure)
    Csv,
    /// JSON format (full report)
    Json,
    /// YAML format (full report, human-readable)
    Yaml,
}

impl ExportFormat {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

/// Arguments of `export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// [FILE] OUTPUT: budget file (optional) and output path
    #[arg(value_name = "PATH", num_args = 1..=2, required = true)]
    pub paths: Vec<PathBuf>,

    /// Area to report on
    #[arg(short, long)]
    pub area: Option<String>,

    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl ExportArgs {
    /// Split the positional paths into (input, output)
    fn input_output(&self) -> BudgetResult<(Option<PathBuf>, PathBuf)> {
        match self.paths.as_slice() {
            [output] => Ok((None, output.clone())),
            [input, output] => Ok((Some(input.clone()), output.clone())),
            _ => Err(BudgetError::Validation(
                "Expected [FILE] OUTPUT".into(),
            )),
        }
    }
}

/// Handle the export command
pub fn handle_export_command(ctx: &CliContext, args: ExportArgs) -> BudgetResult<()> {
    let (input, output) = args.input_output()?;
    let (loaded, selection) = ctx.load(input.as_deref(), args.area.as_deref())?;
    let report = DashboardReport::generate(
        &loaded.prepared,
        &selection,
        &ctx.settings,
        &loaded.source_name(),
    );

    let file = File::create(&output)
        .map_err(|e| BudgetError::Export(format!("Failed to create file: {}", e)))?;
    let mut writer = BufWriter::new(file);
    write_export(&report, args.format, args.pretty, &mut writer)?;

    println!(
        "Exported {} dashboard ({}) to: {}",
        report.selection_label,
        args.format.name(),
        output.display()
    );
    Ok(())
}

/// Write the report in `format` and flush, so late write errors surface
fn write_export<W: Write>(
    report: &DashboardReport,
    format: ExportFormat,
    pretty: bool,
    writer: &mut W,
) -> BudgetResult<()> {
    match format {
        ExportFormat::Json => export_dashboard_json(report, writer, pretty)?,
        ExportFormat::Yaml => export_dashboard_yaml(report, writer)?,
        ExportFormat::Csv => export_dashboard_csv(report, writer)?,
    }

    writer
        .flush()
        .map_err(|e| BudgetError::Export(format!("Failed to write export: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(paths: &[&str]) -> ExportArgs {
        ExportArgs {
            paths: paths.iter().map(PathBuf::from).collect(),
            area: None,
            format: ExportFormat::Json,
            pretty: false,
        }
    }

    #[test]
    fn test_input_output_split() {
        assert_eq!(
            args(&["out.json"]).input_output().unwrap(),
            (None, PathBuf::from("out.json"))
        );
        assert_eq!(
            args(&["budget.csv", "out.json"]).input_output().unwrap(),
            (Some(PathBuf::from("budget.csv")), PathBuf::from("out.json"))
        );
        assert!(args(&[]).input_output().is_err());
    }

    /// Accepts writes, fails when flushed
    struct FlushFails;

    impl Write for FlushFails {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }
    }

    #[test]
    fn test_flush_errors_are_reported() {
        let report = crate::export::json::tests::sample_report();

        for format in [ExportFormat::Json, ExportFormat::Yaml, ExportFormat::Csv] {
            let mut writer = BufWriter::new(FlushFails);
            let err = write_export(&report, format, false, &mut writer).unwrap_err();
            assert!(matches!(err, BudgetError::Export(_)), "{}", format.name());
        }
    }

    #[test]
    fn test_write_export_fills_buffer() {
        let report = crate::export::json::tests::sample_report();
        let mut buffer = Vec::new();
        write_export(&report, ExportFormat::Json, true, &mut buffer).unwrap();
        assert!(String::from_utf8(buffer).unwrap().contains("schema_version"));
    }
}
