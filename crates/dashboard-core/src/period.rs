//! Reporting periods and their resolution into concrete date ranges.
//!
//! `now` is always an explicit argument, so every resolution is
//! deterministic for a given wall-clock instant.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::time_utils::{
    days_before, end_of_day, first_day_of_month, last_day_of_month, start_of_day,
};

// ── DateRange ─────────────────────────────────────────────────────────────────

/// Inclusive `[start, end]` range normalized to whole calendar days.
///
/// `start` is always `00:00:00.000` of its day, `end` is `23:59:59.999` of its
/// day, and `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DateRange {
    /// Build a range covering the days of `start` through `end`.
    ///
    /// An inverted pair collapses to the single day of `start`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self::from_dates(start.date(), end.date())
    }

    /// Build a range covering `start` through `end` inclusive.
    ///
    /// An inverted pair collapses to the single day `start`.
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Self {
        let end = if end < start { start } else { end };
        Self {
            start: start_of_day(start),
            end: end_of_day(end),
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Calendar day containing `start`.
    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Calendar day containing `end`.
    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }

    /// Whether `date` falls on one of the range's days.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start_date() <= date && date <= self.end_date()
    }

    /// Number of calendar days covered, always at least 1.
    pub fn num_days(&self) -> i64 {
        (self.end_date() - self.start_date()).num_days() + 1
    }
}

// ── PeriodSelection ───────────────────────────────────────────────────────────

/// The user's chosen reporting window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PeriodSelection {
    #[default]
    ThisMonth,
    LastMonth,
    Last7Days,
    Last90Days,
    /// Explicit bounds picked by the user.
    Custom {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

impl PeriodSelection {
    /// Whether this is the custom variant.
    pub fn is_custom(&self) -> bool {
        matches!(self, PeriodSelection::Custom { .. })
    }

    /// The preset this selection corresponds to, `None` for custom ranges.
    pub fn preset(&self) -> Option<PeriodPreset> {
        match self {
            PeriodSelection::ThisMonth => Some(PeriodPreset::ThisMonth),
            PeriodSelection::LastMonth => Some(PeriodPreset::LastMonth),
            PeriodSelection::Last7Days => Some(PeriodPreset::Last7Days),
            PeriodSelection::Last90Days => Some(PeriodPreset::Last90Days),
            PeriodSelection::Custom { .. } => None,
        }
    }

    /// Display label shown by the period picker.
    ///
    /// Custom ranges render as `1 May - 15 May 2024`; the start year is
    /// spelled out only when it differs from the end year.
    pub fn label(&self) -> String {
        match self {
            PeriodSelection::Custom { start, end } => {
                let start_fmt = if start.year() != end.year() {
                    "%-d %b %Y"
                } else {
                    "%-d %b"
                };
                format!("{} - {}", start.format(start_fmt), end.format("%-d %b %Y"))
            }
            other => other
                .preset()
                .map(|p| p.label().to_string())
                .unwrap_or_default(),
        }
    }
}

/// The four parameterless periods, in picker order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodPreset {
    ThisMonth,
    LastMonth,
    Last7Days,
    Last90Days,
}

impl PeriodPreset {
    pub const ALL: [PeriodPreset; 4] = [
        PeriodPreset::ThisMonth,
        PeriodPreset::LastMonth,
        PeriodPreset::Last7Days,
        PeriodPreset::Last90Days,
    ];

    pub fn selection(self) -> PeriodSelection {
        match self {
            PeriodPreset::ThisMonth => PeriodSelection::ThisMonth,
            PeriodPreset::LastMonth => PeriodSelection::LastMonth,
            PeriodPreset::Last7Days => PeriodSelection::Last7Days,
            PeriodPreset::Last90Days => PeriodSelection::Last90Days,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PeriodPreset::ThisMonth => "This month",
            PeriodPreset::LastMonth => "Last month",
            PeriodPreset::Last7Days => "Last 7 days",
            PeriodPreset::Last90Days => "Last 90 days",
        }
    }
}

// ── Resolver ──────────────────────────────────────────────────────────────────

/// Resolve a period into a concrete day range relative to `now`.
///
/// * `ThisMonth`: first day of the current month through today.
/// * `LastMonth`: the whole calendar month containing `now - 30 days`. This
///   is not always the previous calendar month (on 31 March it yields March
///   itself); the behaviour is kept as-is.
/// * `Last7Days` / `Last90Days`: the trailing 7 / 90 days including today.
/// * `Custom`: the given bounds widened to whole days.
pub fn resolve(period: &PeriodSelection, now: NaiveDateTime) -> DateRange {
    let today = now.date();
    match *period {
        PeriodSelection::ThisMonth => DateRange::from_dates(first_day_of_month(today), today),
        PeriodSelection::LastMonth => {
            let anchor = days_before(today, 30);
            DateRange::from_dates(first_day_of_month(anchor), last_day_of_month(anchor))
        }
        PeriodSelection::Last7Days => DateRange::from_dates(days_before(today, 6), today),
        PeriodSelection::Last90Days => DateRange::from_dates(days_before(today, 89), today),
        PeriodSelection::Custom { start, end } => DateRange::new(start, end),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveTime};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        ymd(y, m, d).and_hms_opt(h, min, 0).unwrap()
    }

    /// A spread of instants covering month ends, leap days and year ends.
    fn sample_nows() -> Vec<NaiveDateTime> {
        let mut nows = Vec::new();
        let mut day = ymd(2023, 12, 20);
        while day <= ymd(2024, 3, 10) {
            nows.push(day.and_hms_opt(13, 45, 0).unwrap());
            day = day.succ_opt().unwrap();
        }
        nows.push(at(2024, 12, 31, 23, 59));
        nows.push(at(2025, 1, 1, 0, 0));
        nows
    }

    // ── DateRange ────────────────────────────────────────────────────────────

    #[test]
    fn test_date_range_normalizes_to_day_bounds() {
        let range = DateRange::new(at(2024, 5, 1, 10, 30), at(2024, 5, 3, 8, 0));
        assert_eq!(range.start(), ymd(2024, 5, 1).and_time(NaiveTime::MIN));
        assert_eq!(range.end().to_string(), "2024-05-03 23:59:59.999");
        assert_eq!(range.num_days(), 3);
    }

    #[test]
    fn test_date_range_inverted_collapses_to_start_day() {
        let range = DateRange::from_dates(ymd(2024, 5, 10), ymd(2024, 5, 2));
        assert_eq!(range.start_date(), ymd(2024, 5, 10));
        assert_eq!(range.end_date(), ymd(2024, 5, 10));
        assert_eq!(range.num_days(), 1);
    }

    #[test]
    fn test_contains_date_inclusive() {
        let range = DateRange::from_dates(ymd(2024, 5, 1), ymd(2024, 5, 3));
        assert!(range.contains_date(ymd(2024, 5, 1)));
        assert!(range.contains_date(ymd(2024, 5, 3)));
        assert!(!range.contains_date(ymd(2024, 4, 30)));
        assert!(!range.contains_date(ymd(2024, 5, 4)));
    }

    // ── resolve ──────────────────────────────────────────────────────────────

    #[test]
    fn test_resolve_this_month() {
        let range = resolve(&PeriodSelection::ThisMonth, at(2024, 5, 15, 9, 30));
        assert_eq!(range.start().to_string(), "2024-05-01 00:00:00");
        assert_eq!(range.end().to_string(), "2024-05-15 23:59:59.999");
    }

    #[test]
    fn test_resolve_this_month_on_first_day() {
        let range = resolve(&PeriodSelection::ThisMonth, at(2024, 5, 1, 0, 0));
        assert_eq!(range.num_days(), 1);
    }

    #[test]
    fn test_resolve_last_month_mid_month() {
        let range = resolve(&PeriodSelection::LastMonth, at(2024, 5, 15, 12, 0));
        assert_eq!(range.start_date(), ymd(2024, 4, 1));
        assert_eq!(range.end_date(), ymd(2024, 4, 30));
    }

    #[test]
    fn test_resolve_last_month_keeps_thirty_day_approximation() {
        // 31 March minus 30 days is 1 March, so "last month" is March.
        let range = resolve(&PeriodSelection::LastMonth, at(2024, 3, 31, 12, 0));
        assert_eq!(range.start_date(), ymd(2024, 3, 1));
        assert_eq!(range.end_date(), ymd(2024, 3, 31));

        // 1 March minus 30 days is 31 January, skipping February entirely.
        let range = resolve(&PeriodSelection::LastMonth, at(2024, 3, 1, 12, 0));
        assert_eq!(range.start_date(), ymd(2024, 1, 1));
        assert_eq!(range.end_date(), ymd(2024, 1, 31));
    }

    #[test]
    fn test_resolve_last_7_days_spans_seven_days_ending_today() {
        for now in sample_nows() {
            let range = resolve(&PeriodSelection::Last7Days, now);
            assert_eq!(range.num_days(), 7, "now = {now}");
            assert_eq!(range.end_date(), now.date());
            assert_eq!(range.start_date(), now.date() - Duration::days(6));
        }
    }

    #[test]
    fn test_resolve_last_90_days_spans_ninety_days_ending_today() {
        for now in sample_nows() {
            let range = resolve(&PeriodSelection::Last90Days, now);
            assert_eq!(range.num_days(), 90, "now = {now}");
            assert_eq!(range.end_date(), now.date());
        }
    }

    #[test]
    fn test_resolve_presets_are_normalized() {
        for now in sample_nows() {
            for preset in PeriodPreset::ALL {
                let range = resolve(&preset.selection(), now);
                assert_eq!(range.start().time(), NaiveTime::MIN);
                assert_eq!(range.end(), end_of_day(range.end_date()));
                assert!(range.start() <= range.end());
            }
        }
    }

    #[test]
    fn test_resolve_custom_normalizes_bounds() {
        let period = PeriodSelection::Custom {
            start: at(2024, 2, 10, 15, 0),
            end: at(2024, 2, 20, 1, 0),
        };
        let range = resolve(&period, at(2024, 6, 1, 0, 0));
        assert_eq!(range.start().to_string(), "2024-02-10 00:00:00");
        assert_eq!(range.end().to_string(), "2024-02-20 23:59:59.999");
    }

    #[test]
    fn test_resolve_custom_ignores_now() {
        let period = PeriodSelection::Custom {
            start: at(2024, 2, 10, 0, 0),
            end: at(2024, 2, 20, 0, 0),
        };
        assert_eq!(
            resolve(&period, at(2020, 1, 1, 0, 0)),
            resolve(&period, at(2030, 1, 1, 0, 0))
        );
    }

    // ── Labels ───────────────────────────────────────────────────────────────

    #[test]
    fn test_preset_labels() {
        assert_eq!(PeriodSelection::ThisMonth.label(), "This month");
        assert_eq!(PeriodSelection::LastMonth.label(), "Last month");
        assert_eq!(PeriodSelection::Last7Days.label(), "Last 7 days");
        assert_eq!(PeriodSelection::Last90Days.label(), "Last 90 days");
    }

    #[test]
    fn test_custom_label_same_year() {
        let period = PeriodSelection::Custom {
            start: at(2024, 5, 1, 0, 0),
            end: at(2024, 5, 15, 0, 0),
        };
        assert_eq!(period.label(), "1 May - 15 May 2024");
    }

    #[test]
    fn test_custom_label_across_years() {
        let period = PeriodSelection::Custom {
            start: at(2023, 12, 1, 0, 0),
            end: at(2024, 1, 5, 0, 0),
        };
        assert_eq!(period.label(), "1 Dec 2023 - 5 Jan 2024");
    }

    #[test]
    fn test_preset_round_trip() {
        for preset in PeriodPreset::ALL {
            assert_eq!(preset.selection().preset(), Some(preset));
        }
        assert!(PeriodSelection::default() == PeriodSelection::ThisMonth);
    }
}
