//! Export projection and CSV serialization.
//!
//! [`project`] flattens filtered records into one row per `(day, model)`;
//! [`to_csv`] renders those rows and [`write_csv`] stores them under a name
//! derived from the selected range.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::{DailyRecord, UsageCategory, NO_MODEL};
use dashboard_core::period::DateRange;

// ── Projection ────────────────────────────────────────────────────────────────

/// One flat export line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub date: NaiveDate,
    /// `None` for days without any token usage.
    pub model: Option<String>,
    pub tokens: u64,
    pub ocr_pages: u64,
    pub automation_executions: u64,
    pub secondary_automation_executions: u64,
}

impl ExportRow {
    /// Model name, or the `N/A` marker for days without token usage.
    pub fn model_name(&self) -> &str {
        self.model.as_deref().unwrap_or(NO_MODEL)
    }
}

/// Fan each record out into one row per token usage.
///
/// A record without token usage still yields exactly one row, with no model
/// and zero tokens. Day-level counters repeat on every row of their day.
/// Record order and per-record usage order are preserved.
pub fn project(records: &[DailyRecord]) -> Vec<ExportRow> {
    records
        .iter()
        .flat_map(|record| {
            let row = |model: Option<String>, tokens: u64| ExportRow {
                date: record.date,
                model,
                tokens,
                ocr_pages: record.ocr_pages,
                automation_executions: record.automation_executions,
                secondary_automation_executions: record.secondary_automation_executions,
            };

            if record.token_usages.is_empty() {
                vec![row(None, 0)]
            } else {
                record
                    .token_usages
                    .iter()
                    .map(|usage| row(Some(usage.model.clone()), usage.tokens))
                    .collect()
            }
        })
        .collect()
}

// ── CSV ───────────────────────────────────────────────────────────────────────

/// The header line.
pub fn csv_header() -> String {
    let mut columns = vec!["Date", "Model", "Tokens"];
    columns.extend(UsageCategory::ALL.iter().map(|category| category.label()));
    columns.join(",")
}

/// Render one row. The model is wrapped in double quotes without escaping;
/// the `N/A` marker is written bare.
fn csv_row(row: &ExportRow) -> String {
    let model = match &row.model {
        Some(model) => format!("\"{}\"", model),
        None => NO_MODEL.to_string(),
    };
    format!(
        "{},{},{},{},{},{}",
        row.date.format("%Y-%m-%d"),
        model,
        row.tokens,
        row.ocr_pages,
        row.automation_executions,
        row.secondary_automation_executions
    )
}

/// Header plus one line per row, joined by `\n`, without a trailing newline.
pub fn to_csv(rows: &[ExportRow]) -> String {
    std::iter::once(csv_header())
        .chain(rows.iter().map(csv_row))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `consumption_data_<start>_to_<end>.csv` for the range's first and last day.
pub fn file_name(range: &DateRange) -> String {
    format!(
        "consumption_data_{}_to_{}.csv",
        range.start_date().format("%Y-%m-%d"),
        range.end_date().format("%Y-%m-%d")
    )
}

/// Project `records`, render them and write the CSV into `dir`.
///
/// Refuses with [`DashboardError::NothingToExport`] when `records` is empty;
/// no file is created in that case. `dir` is created if missing.
pub fn write_csv(dir: &Path, range: &DateRange, records: &[DailyRecord]) -> Result<PathBuf> {
    if records.is_empty() {
        return Err(DashboardError::NothingToExport);
    }

    let rows = project(records);
    let path = dir.join(file_name(range));

    std::fs::create_dir_all(dir).map_err(|source| DashboardError::ExportWrite {
        path: dir.to_path_buf(),
        source,
    })?;
    std::fs::write(&path, to_csv(&rows)).map_err(|source| DashboardError::ExportWrite {
        path: path.clone(),
        source,
    })?;

    info!("Exported {} rows to {}", rows.len(), path.display());
    Ok(path)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
