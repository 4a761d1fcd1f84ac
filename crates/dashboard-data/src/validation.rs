//! Contract checks applied to a workspace before it reaches the core.
//!
//! The filter and aggregator assume well-formed input; anything that would
//! break their invariants is rejected here with a descriptive error.

use std::collections::HashSet;

use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::{DailyRecord, Workspace};

/// Validate a full workspace: its plan and every record.
pub fn validate_workspace(workspace: &Workspace) -> Result<()> {
    workspace.plan.validate()?;
    validate_records(&workspace.records)
}

/// Validate a record collection.
///
/// * dates are unique across the collection
/// * a model appears at most once per record
/// * model names are not blank
///
/// Ordering is not checked; consumers never rely on it.
pub fn validate_records(records: &[DailyRecord]) -> Result<()> {
    let mut seen_dates = HashSet::with_capacity(records.len());

    for record in records {
        if !seen_dates.insert(record.date) {
            return Err(DashboardError::InvalidRecord(format!(
                "duplicate date {}",
                record.date
            )));
        }
        validate_token_usages(record)?;
    }

    Ok(())
}

fn validate_token_usages(record: &DailyRecord) -> Result<()> {
    let mut seen_models: HashSet<&str> = HashSet::with_capacity(record.token_usages.len());

    for usage in &record.token_usages {
        if usage.model.trim().is_empty() {
            return Err(DashboardError::InvalidRecord(format!(
                "empty model name on {}",
                record.date
            )));
        }
        if !seen_models.insert(usage.model.as_str()) {
            return Err(DashboardError::InvalidRecord(format!(
                "model {} listed twice on {}",
                usage.model, record.date
            )));
        }
    }

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
