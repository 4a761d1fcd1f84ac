//! Dashboard session: the loaded workspace, the period state and the derived
//! snapshot that the UI renders.
//!
//! Every range change or data refresh recomputes the snapshot from scratch;
//! nothing derived is ever patched in place. A failed refresh keeps the
//! previous workspace and records the error for display.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::{DailyRecord, Workspace};
use dashboard_core::period::DateRange;
use dashboard_data::aggregator::{aggregate, Aggregation};
use dashboard_data::export::write_csv;
use dashboard_data::filter::filter_by_range;
use dashboard_data::reader::load_workspace;
use dashboard_data::sample::sample_workspace;

use crate::period_state::{transition, PeriodAction, PeriodState};

// ── DataSource ────────────────────────────────────────────────────────────────

/// Where the workspace comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// A workspace JSON document on disk.
    File(PathBuf),
    /// Generated records ending on the current day.
    Sample { seed: Option<u64>, days: u32 },
}

impl DataSource {
    /// Load a fresh workspace; `now` anchors generated sample data.
    pub fn load(&self, now: NaiveDateTime) -> Result<Workspace> {
        match self {
            DataSource::File(path) => load_workspace(path),
            DataSource::Sample { seed, days } => Ok(sample_workspace(now.date(), *days, *seed)),
        }
    }

    /// Short human-readable description for the status line.
    pub fn describe(&self) -> String {
        match self {
            DataSource::File(path) => path.display().to_string(),
            DataSource::Sample { days, .. } => format!("sample data ({} days)", days),
        }
    }
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

/// Everything the presentation layer needs for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub range: DateRange,
    pub period_label: String,
    pub filtered: Vec<DailyRecord>,
    pub aggregation: Aggregation,
}

impl Snapshot {
    fn compute(workspace: &Workspace, period: &PeriodState) -> Self {
        let range = period.range();
        let filtered = filter_by_range(&workspace.records, &range);
        let aggregation = aggregate(&filtered, &workspace.plan.multipliers);

        debug!(
            start = %range.start_date(),
            end = %range.end_date(),
            records = filtered.len(),
            "snapshot recomputed"
        );

        Self {
            range,
            period_label: period.selection().label(),
            filtered,
            aggregation,
        }
    }

    /// Export is offered only when the selection holds at least one record.
    pub fn can_export(&self) -> bool {
        !self.filtered.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.filtered.len()
    }
}

// ── DashboardSession ──────────────────────────────────────────────────────────

pub struct DashboardSession {
    source: DataSource,
    workspace: Workspace,
    period: PeriodState,
    snapshot: Snapshot,
    /// Human-readable description of the last refresh failure.
    last_error: Option<String>,
    /// Local time of the last successful load.
    loaded_at: NaiveDateTime,
}

impl DashboardSession {
    /// Load the workspace from `source` and compute the initial snapshot.
    pub fn new(source: DataSource, now: NaiveDateTime) -> Result<Self> {
        let workspace = source.load(now)?;
        info!(
            source = %source.describe(),
            client = %workspace.client.name,
            plan = %workspace.plan.name,
            "dashboard session started"
        );
        Ok(Self::with_workspace(source, workspace, now))
    }

    /// Build a session around an already-loaded workspace.
    pub fn with_workspace(source: DataSource, workspace: Workspace, now: NaiveDateTime) -> Self {
        let period = PeriodState::initial(now);
        let snapshot = Snapshot::compute(&workspace, &period);
        Self {
            source,
            workspace,
            period,
            snapshot,
            last_error: None,
            loaded_at: now,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn period(&self) -> &PeriodState {
        &self.period
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn loaded_at(&self) -> NaiveDateTime {
        self.loaded_at
    }

    pub fn can_export(&self) -> bool {
        self.snapshot.can_export()
    }

    // ── Actions ───────────────────────────────────────────────────────────

    /// Feed a period action through the state machine.
    ///
    /// The snapshot is recomputed only when the active range changed; staged
    /// edits alone leave it untouched.
    pub fn apply(&mut self, action: PeriodAction, now: NaiveDateTime) {
        let next = transition(&self.period, action, now);
        let range_changed =
            next.range() != self.period.range() || next.selection() != self.period.selection();
        self.period = next;
        if range_changed {
            self.recompute();
        }
    }

    /// Reload the workspace and rebuild the snapshot for the current
    /// selection, re-resolving presets against `now`.
    ///
    /// On failure the previous workspace stays in place, the error is kept
    /// for [`last_error`](Self::last_error) and returned.
    pub fn refresh(&mut self, now: NaiveDateTime) -> Result<()> {
        match self.source.load(now) {
            Ok(workspace) => {
                info!(
                    records = workspace.records.len(),
                    "workspace refreshed from {}",
                    self.source.describe()
                );
                self.workspace = workspace;
                self.period = self.period.rebased(now);
                self.last_error = None;
                self.loaded_at = now;
                self.recompute();
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "refresh failed; keeping previous data");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Write the current selection as CSV into `dir`.
    pub fn export(&self, dir: &Path) -> Result<PathBuf> {
        if !self.can_export() {
            return Err(DashboardError::NothingToExport);
        }
        write_csv(dir, &self.snapshot.range, &self.snapshot.filtered)
    }

    fn recompute(&mut self) {
        self.snapshot = Snapshot::compute(&self.workspace, &self.period);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dashboard_core::models::TokenUsage;
    use dashboard_core::period::PeriodPreset;
    use std::io::Write;
    use tempfile::TempDir;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn now() -> NaiveDateTime {
        ymd(2024, 5, 15).and_hms_opt(12, 0, 0).unwrap()
    }

    fn sample_source() -> DataSource {
        DataSource::Sample {
            seed: Some(11),
            days: 120,
        }
    }

    fn write_workspace(dir: &Path, records: serde_json::Value) -> PathBuf {
        let path = dir.join("workspace.json");
        let doc = serde_json::json!({
            "client": { "name": "Globex" },
            "plan": { "name": "Starter", "multipliers": { "gpt-4o": 0.00001 } },
            "records": records,
        });
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", doc).unwrap();
        path
    }

    // ── DataSource ────────────────────────────────────────────────────────────

    #[test]
    fn test_sample_source_loads_enterprise_workspace() {
        let workspace = sample_source().load(now()).unwrap();
        assert_eq!(workspace.plan.name, "Enterprise");
        assert_eq!(workspace.records.len(), 120);
        assert_eq!(workspace.records.last().unwrap().date, now().date());
    }

    #[test]
    fn test_describe() {
        assert_eq!(sample_source().describe(), "sample data (120 days)");
        assert_eq!(
            DataSource::File(PathBuf::from("/data/ws.json")).describe(),
            "/data/ws.json"
        );
    }

    // ── Session ───────────────────────────────────────────────────────────────

    #[test]
    fn test_new_session_shows_this_month() {
        let session = DashboardSession::new(sample_source(), now()).unwrap();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.period_label, "This month");
        assert_eq!(snapshot.record_count(), 15);
        assert_eq!(snapshot.aggregation.record_count, 15);
        assert!(session.can_export());
        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_new_session_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let source = DataSource::File(dir.path().join("missing.json"));
        assert!(DashboardSession::new(source, now()).is_err());
    }

    #[test]
    fn test_apply_preset_recomputes_snapshot() {
        let mut session = DashboardSession::new(sample_source(), now()).unwrap();
        session.apply(PeriodAction::SelectPreset(PeriodPreset::Last90Days), now());
        assert_eq!(session.snapshot().record_count(), 90);
        assert_eq!(session.snapshot().period_label, "Last 90 days");
    }

    #[test]
    fn test_staged_edit_leaves_snapshot_alone() {
        let mut session = DashboardSession::new(sample_source(), now()).unwrap();
        let before = session.snapshot().clone();
        session.apply(PeriodAction::EditCustomStart(ymd(2024, 2, 1)), now());
        assert!(session.period().is_editing());
        assert_eq!(session.snapshot(), &before);
    }

    #[test]
    fn test_custom_range_outside_data_disables_export() {
        let mut session = DashboardSession::new(sample_source(), now()).unwrap();
        session.apply(PeriodAction::EditCustomStart(ymd(2020, 1, 1)), now());
        session.apply(PeriodAction::EditCustomEnd(ymd(2020, 1, 31)), now());
        session.apply(PeriodAction::ApplyCustom, now());

        assert_eq!(session.snapshot().record_count(), 0);
        assert_eq!(session.snapshot().aggregation.weighted_total, 0.0);
        assert!(!session.can_export());

        let dir = TempDir::new().unwrap();
        let err = session.export(dir.path()).unwrap_err();
        assert!(matches!(err, DashboardError::NothingToExport));
    }

    #[test]
    fn test_export_writes_selected_range() {
        let mut session = DashboardSession::new(sample_source(), now()).unwrap();
        session.apply(PeriodAction::SelectPreset(PeriodPreset::Last7Days), now());

        let dir = TempDir::new().unwrap();
        let path = session.export(dir.path()).unwrap();
        assert!(path.ends_with("consumption_data_2024-05-09_to_2024-05-15.csv"));

        let content = std::fs::read_to_string(path).unwrap();
        // Header plus four model rows per day.
        assert_eq!(content.lines().count(), 1 + 7 * 4);
    }

    // ── Refresh ───────────────────────────────────────────────────────────────

    #[test]
    fn test_refresh_picks_up_new_file_contents() {
        let dir = TempDir::new().unwrap();
        let path = write_workspace(
            dir.path(),
            serde_json::json!([{ "date": "2024-05-10", "tokenUsages": [{"model": "gpt-4o", "tokens": 1000}] }]),
        );
        let mut session = DashboardSession::new(DataSource::File(path.clone()), now()).unwrap();
        assert_eq!(session.snapshot().record_count(), 1);

        write_workspace(
            dir.path(),
            serde_json::json!([
                { "date": "2024-05-10", "tokenUsages": [{"model": "gpt-4o", "tokens": 1000}] },
                { "date": "2024-05-11", "tokenUsages": [{"model": "gpt-4o", "tokens": 2000}] }
            ]),
        );
        session.refresh(now()).unwrap();
        assert_eq!(session.snapshot().record_count(), 2);
        assert!((session.snapshot().aggregation.weighted_total - 0.03).abs() < 1e-12);
    }

    #[test]
    fn test_refresh_failure_keeps_previous_data() {
        let dir = TempDir::new().unwrap();
        let path = write_workspace(
            dir.path(),
            serde_json::json!([{ "date": "2024-05-10", "ocrPages": 4 }]),
        );
        let mut session = DashboardSession::new(DataSource::File(path.clone()), now()).unwrap();
        let before = session.snapshot().clone();

        std::fs::write(&path, "{ broken").unwrap();
        assert!(session.refresh(now()).is_err());
        assert_eq!(session.snapshot(), &before);
        assert!(session.last_error().unwrap().contains("parse"));
        assert_eq!(session.workspace().client.name, "Globex");
    }

    #[test]
    fn test_refresh_rebases_presets() {
        let mut session = DashboardSession::new(sample_source(), now()).unwrap();
        session.apply(PeriodAction::SelectPreset(PeriodPreset::Last7Days), now());

        let tomorrow = ymd(2024, 5, 16).and_hms_opt(8, 0, 0).unwrap();
        session.refresh(tomorrow).unwrap();
        assert_eq!(session.snapshot().range.end_date(), ymd(2024, 5, 16));
        assert_eq!(session.snapshot().record_count(), 7);
        assert_eq!(session.loaded_at(), tomorrow);
    }

    #[test]
    fn test_with_workspace_uses_given_records() {
        let mut record = DailyRecord::empty(ymd(2024, 5, 2));
        record.token_usages.push(TokenUsage::new("gpt-4o", 500));
        let workspace = Workspace {
            client: dashboard_core::models::Client {
                name: "Initech".to_string(),
            },
            plan: dashboard_data::sample::enterprise_plan(),
            records: vec![record],
        };
        let session = DashboardSession::with_workspace(sample_source(), workspace, now());
        assert_eq!(session.snapshot().aggregation.token_total("gpt-4o"), 500);
    }
}
