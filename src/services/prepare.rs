//! Budget file preparation
//!
//! Reads the delimited budget file, validates the header against the
//! configured column names and turns every row into a normalized
//! [`BudgetRecord`]. Bad data degrades instead of failing: unparseable
//! amounts become zero and malformed lines are skipped, both reported as
//! [`ParseIssue`]s.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{ColumnNames, Labels};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    normalize_text, Amount, AmountParseError, BudgetRecord, BudgetTable, RecordType,
};
use crate::storage::cache::stable_digest;

/// How to read the budget file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseOptions {
    pub delimiter: char,
    pub currency_symbol: String,
    pub columns: ColumnNames,
    pub labels: Labels,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: ';',
            currency_symbol: "$".to_string(),
            columns: ColumnNames::default(),
            labels: Labels::default(),
        }
    }
}

impl ParseOptions {
    /// Stable fingerprint, part of the parse cache key
    pub fn fingerprint(&self) -> String {
        let canonical = serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self));
        stable_digest(canonical.as_bytes())
    }

    fn delimiter_byte(&self) -> BudgetResult<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(BudgetError::Validation(format!(
                "Delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )))
        }
    }
}

/// What went wrong with one source line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum ParseIssueKind {
    /// The amount could not be read and was set to zero
    UnparseableValue { column: String, raw: String },
    /// The amount was negative and was set to zero
    NegativeValue { column: String, raw: String },
    /// The whole line was skipped
    MalformedLine { reason: String },
}

/// A recovered problem in the source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseIssue {
    /// 1-based line number in the source file (the header is line 1)
    pub line: u64,
    pub kind: ParseIssueKind,
}

/// Result of preparing a budget file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparationOutcome {
    pub table: BudgetTable,
    pub issues: Vec<ParseIssue>,
}

impl ParseIssue {
    pub fn is_skipped_line(&self) -> bool {
        matches!(self.kind, ParseIssueKind::MalformedLine { .. })
    }
}

/// `(skipped lines, zeroed values)` in a list of issues
pub fn issue_counts(issues: &[ParseIssue]) -> (usize, usize) {
    let skipped = issues.iter().filter(|i| i.is_skipped_line()).count();
    (skipped, issues.len() - skipped)
}

impl PreparationOutcome {
    /// Number of lines skipped as malformed
    pub fn skipped_lines(&self) -> usize {
        issue_counts(&self.issues).0
    }

    /// Number of amounts replaced by zero
    pub fn zeroed_values(&self) -> usize {
        issue_counts(&self.issues).1
    }
}

/// Column positions resolved from the header row
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    record_type: usize,
    category: usize,
    area: usize,
    amount: usize,
    cost_center: usize,
}

impl ColumnIndex {
    fn resolve(headers: &[String], columns: &ColumnNames) -> BudgetResult<Self> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        let mut missing = Vec::new();
        for name in columns.required() {
            if position(name).is_none() {
                missing.push(name.to_string());
            }
        }

        if !missing.is_empty() {
            return Err(BudgetError::schema(missing, headers.to_vec()));
        }

        let find = |name: &str| {
            position(name).ok_or_else(|| BudgetError::schema(vec![name.into()], headers.to_vec()))
        };

        Ok(Self {
            record_type: find(&columns.record_type)?,
            category: find(&columns.category)?,
            area: find(&columns.area)?,
            amount: find(&columns.amount)?,
            cost_center: find(&columns.cost_center)?,
        })
    }
}

/// Prepare a budget file from disk
pub fn prepare_file(path: &Path, options: &ParseOptions) -> BudgetResult<PreparationOutcome> {
    let file = File::open(path).map_err(|e| {
        BudgetError::Io(format!("Failed to open {}: {}", path.display(), e))
    })?;

    info!(path = %path.display(), "preparing budget file");
    prepare_table(file, options)
}

/// Prepare budget records from any reader
pub fn prepare_table<R: Read>(reader: R, options: &ParseOptions) -> BudgetResult<PreparationOutcome> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter_byte()?)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let index = ColumnIndex::resolve(&headers, &options.columns)?;

    let mut records = Vec::new();
    let mut issues = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        // Fallback when the reader reports no position: header + 1-based row
        let fallback_line = idx as u64 + 2;

        let row = match result {
            Ok(row) => row,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(fallback_line);
                warn!(line, error = %e, "skipping unreadable line");
                issues.push(ParseIssue {
                    line,
                    kind: ParseIssueKind::MalformedLine {
                        reason: e.to_string(),
                    },
                });
                continue;
            }
        };

        let line = row.position().map(|p| p.line()).unwrap_or(fallback_line);

        if row.len() > headers.len() {
            warn!(
                line,
                fields = row.len(),
                expected = headers.len(),
                "skipping line with too many fields"
            );
            issues.push(ParseIssue {
                line,
                kind: ParseIssueKind::MalformedLine {
                    reason: format!(
                        "expected {} fields, found {}",
                        headers.len(),
                        row.len()
                    ),
                },
            });
            continue;
        }

        let (record, issue) = parse_row(&row, line, index, options);
        if let Some(issue) = issue {
            issues.push(issue);
        }
        records.push(record);
    }

    let outcome = PreparationOutcome {
        table: BudgetTable::new(records),
        issues,
    };

    info!(
        records = outcome.table.len(),
        skipped = outcome.skipped_lines(),
        zeroed = outcome.zeroed_values(),
        "budget file prepared"
    );

    Ok(outcome)
}

/// Build one record; missing trailing fields read as empty
fn parse_row(
    row: &StringRecord,
    line: u64,
    index: ColumnIndex,
    options: &ParseOptions,
) -> (BudgetRecord, Option<ParseIssue>) {
    let field = |i: usize| row.get(i).unwrap_or("");

    let type_label = normalize_text(field(index.record_type));
    let record_type = RecordType::classify(
        &type_label,
        &options.labels.income,
        &options.labels.expense,
    );

    let raw_amount = field(index.amount);
    let column = options.columns.amount.clone();
    let (amount, issue) = match Amount::parse(raw_amount, &options.currency_symbol) {
        Ok(amount) => (amount, None),
        Err(err) => {
            let raw = raw_amount.trim().to_string();
            let kind = match err {
                AmountParseError::Negative(_) => {
                    warn!(line, value = %raw, "negative amount set to zero");
                    ParseIssueKind::NegativeValue { column, raw }
                }
                AmountParseError::Empty => {
                    debug!(line, "empty amount set to zero");
                    ParseIssueKind::UnparseableValue { column, raw }
                }
                AmountParseError::InvalidFormat(_) => {
                    warn!(line, value = %raw, "unparseable amount set to zero");
                    ParseIssueKind::UnparseableValue { column, raw }
                }
                AmountParseError::TooLarge(_) => {
                    warn!(line, value = %raw, "out of range amount set to zero");
                    ParseIssueKind::UnparseableValue { column, raw }
                }
            };
            (Amount::zero(), Some(ParseIssue { line, kind }))
        }
    };

    let record = BudgetRecord::new(
        record_type,
        field(index.category),
        field(index.area),
        field(index.cost_center),
        amount,
    );

    (record, issue)
}
