//! Workspace document loading.
//!
//! A workspace file is a single JSON object:
//!
//! ```json
//! {
//!   "client": { "name": "Acme Analytics" },
//!   "plan": { "name": "Enterprise", "multipliers": { "gpt-4o": 0.000015, "ocrPages": 0.08 } },
//!   "records": [
//!     { "date": "2024-05-01", "tokenUsages": [{ "model": "gpt-4o", "tokens": 1200 }],
//!       "ocrPages": 12, "automationExecutions": 80, "secondaryAutomationExecutions": 40 }
//!   ]
//! }
//! ```

use std::path::Path;

use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::Workspace;
use tracing::{debug, info};

use crate::validation::validate_workspace;

// ── Public API ────────────────────────────────────────────────────────────────

/// Read, parse and validate the workspace document at `path`.
pub fn load_workspace(path: &Path) -> Result<Workspace> {
    let content = std::fs::read_to_string(path).map_err(|source| DashboardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let workspace = parse_workspace(&content)?;

    info!(
        "Loaded {} daily records for {} ({} plan) from {}",
        workspace.records.len(),
        workspace.client.name,
        workspace.plan.name,
        path.display()
    );

    Ok(workspace)
}

/// Parse and validate a workspace document held in memory.
pub fn parse_workspace(content: &str) -> Result<Workspace> {
    let workspace: Workspace = serde_json::from_str(content)?;
    validate_workspace(&workspace)?;

    debug!(
        "Workspace parsed: {} records, {} multipliers",
        workspace.records.len(),
        workspace.plan.multipliers.len()
    );

    Ok(workspace)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
