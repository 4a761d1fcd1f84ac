use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use tracing::warn;

// ── System timezone detection ─────────────────────────────────────────────────

/// Detect the IANA timezone name of the running system.
///
/// Uses the `iana-time-zone` crate directly – no subprocess calls.
/// Falls back to `"UTC"` if detection fails.
pub fn get_system_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

// ── TimezoneHandler ───────────────────────────────────────────────────────────

/// Converts wall-clock time into the dashboard's display timezone.
///
/// Every calendar-day computation in the dashboard runs on naive local
/// date-times produced by this handler, so "today" always means today in the
/// configured timezone.
#[derive(Debug, Clone, Copy)]
pub struct TimezoneHandler {
    tz: Tz,
}

impl TimezoneHandler {
    /// Create a handler for the given IANA timezone name.
    ///
    /// If `tz_name` is not a recognised IANA timezone, falls back to UTC
    /// and logs a warning.
    pub fn new(tz_name: &str) -> Self {
        let tz = tz_name.parse::<Tz>().unwrap_or_else(|_| {
            warn!(
                "TimezoneHandler: unrecognised timezone \"{}\", falling back to UTC",
                tz_name
            );
            Tz::UTC
        });
        Self { tz }
    }

    /// Validate that `tz_name` is a recognised IANA timezone identifier.
    pub fn validate_timezone(tz_name: &str) -> bool {
        tz_name.parse::<Tz>().is_ok()
    }

    /// Local wall-clock representation of a UTC instant.
    pub fn to_local(&self, dt: DateTime<Utc>) -> NaiveDateTime {
        dt.with_timezone(&self.tz).naive_local()
    }

    /// The current local wall-clock time.
    pub fn now(&self) -> NaiveDateTime {
        self.to_local(Utc::now())
    }

    /// Expose the configured timezone.
    pub fn tz(&self) -> Tz {
        self.tz
    }
}

// ── Calendar-day boundaries ───────────────────────────────────────────────────

/// `00:00:00.000` on `date`.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// `23:59:59.999` on `date`.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_else(|| start_of_day(date))
}

/// The first calendar day of the month containing `date`.
pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// The last calendar day of the month containing `date`.
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// `date` moved back by `days` calendar days, saturating at the earliest
/// representable date.
pub fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days))
        .unwrap_or(NaiveDate::MIN)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
