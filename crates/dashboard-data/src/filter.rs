//! Range filter: selects the daily records that fall inside a resolved range.

use dashboard_core::models::DailyRecord;
use dashboard_core::period::DateRange;

/// Records whose date lies on one of the range's days, in input order.
///
/// Comparison is by calendar day, so the time components of the range
/// bounds never exclude a record on a boundary day.
pub fn filter_by_range(records: &[DailyRecord], range: &DateRange) -> Vec<DailyRecord> {
    records
        .iter()
        .filter(|record| range.contains_date(record.date))
        .cloned()
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
