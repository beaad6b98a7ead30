//! Time utilities for the front desk
//!
//! All billing and reporting runs on local wall-clock time: visits are
//! grouped by the local calendar day they started on.
//!
//! # Mock Time for Development
//!
//! In debug builds, the `SAUNA_MOCK_TIME` environment variable can be set
//! to override the system time for all time-sensitive operations. This is useful
//! for trying out overtime billing and day reports without waiting.
//!
//! Format: `YYYY-MM-DD HH:MM:SS` (e.g., `2025-12-25 14:30:00`)
//!
//! Example:
//! ```bash
//! SAUNA_MOCK_TIME="2025-12-25 14:30:00" sauna-desk active
//! ```

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, TimeZone};
use std::sync::OnceLock;

/// Environment variable name for mock time (debug builds only)
pub const MOCK_TIME_ENV_VAR: &str = "SAUNA_MOCK_TIME";

/// Format accepted for mock time
pub const MOCK_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format used for calendar dates on the command line and in reports
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Cached mock time offset from the real time when the process started.
/// This allows mock time to advance naturally.
static MOCK_TIME_OFFSET: OnceLock<Option<Duration>> = OnceLock::new();

/// Initialize the mock time offset based on the environment variable.
/// Returns the offset between mock time and real time at process start.
fn get_mock_time_offset() -> Option<Duration> {
    *MOCK_TIME_OFFSET.get_or_init(|| {
        #[cfg(debug_assertions)]
        {
            if let Ok(mock_time_str) = std::env::var(MOCK_TIME_ENV_VAR) {
                match parse_mock_time(&mock_time_str) {
                    Some(mock_dt) => {
                        let offset = mock_dt.signed_duration_since(chrono::Local::now());
                        tracing::info!(
                            mock_time = %mock_time_str,
                            offset_secs = offset.num_seconds(),
                            "Mock time enabled"
                        );
                        return Some(offset);
                    }
                    None => {
                        tracing::warn!(
                            mock_time = %mock_time_str,
                            expected_format = MOCK_TIME_FORMAT,
                            "Invalid mock time, using the system clock"
                        );
                    }
                }
            }
            None
        }
        #[cfg(not(debug_assertions))]
        {
            None
        }
    })
}

fn parse_mock_time(s: &str) -> Option<DateTime<Local>> {
    let naive = NaiveDateTime::parse_from_str(s, MOCK_TIME_FORMAT).ok()?;
    Local.from_local_datetime(&naive).single()
}

/// Returns whether mock time is currently active.
pub fn is_mock_time_active() -> bool {
    get_mock_time_offset().is_some()
}

/// Get the current local time, respecting mock time settings in debug builds.
///
/// In release builds, this always returns the real system time.
/// In debug builds, if `SAUNA_MOCK_TIME` is set, this returns a time
/// that advances from the mock time at the same rate as real time.
pub fn now() -> DateTime<Local> {
    let real_now = chrono::Local::now();

    if let Some(offset) = get_mock_time_offset() {
        real_now + offset
    } else {
        real_now
    }
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// First day of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Whether `dt` falls on a local calendar day within `[start, end]`
pub fn within_days(dt: &DateTime<Local>, start: NaiveDate, end: NaiveDate) -> bool {
    let day = dt.date_naive();
    start <= day && day <= end
}

/// Format a DateTime as a wall-clock time for the on-site list.
pub fn format_clock_time(dt: &DateTime<Local>) -> String {
    dt.format("%H:%M").to_string()
}

/// Format a DateTime for display with full date and time.
pub fn format_datetime_full(dt: &DateTime<Local>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format a calendar date the way reports and file names use it
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Format a length of stay, e.g. `3h 05m`
pub fn format_stay(d: Duration) -> String {
    let total_mins = d.num_minutes().max(0);
    format!("{}h {:02}m", total_mins / 60, total_mins % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock_time() {
        let dt = Local.with_ymd_and_hms(2025, 12, 25, 14, 30, 45).unwrap();
        assert_eq!(format_clock_time(&dt), "14:30");
    }

    #[test]
    fn test_format_datetime_full() {
        let dt = Local.with_ymd_and_hms(2025, 12, 25, 14, 30, 45).unwrap();
        assert_eq!(format_datetime_full(&dt), "2025-12-25 14:30:45");
    }

    #[test]
    fn test_format_stay() {
        assert_eq!(format_stay(Duration::minutes(185)), "3h 05m");
        assert_eq!(format_stay(Duration::minutes(59)), "0h 59m");
        assert_eq!(format_stay(Duration::minutes(-5)), "0h 00m");
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-03-09"),
            NaiveDate::from_ymd_opt(2025, 3, 9)
        );
        assert_eq!(
            parse_date(" 2025-03-09 "),
            NaiveDate::from_ymd_opt(2025, 3, 9)
        );
        assert!(parse_date("2025/03/09").is_none());
        assert!(parse_date("2025-02-30").is_none());
    }

    #[test]
    fn test_first_of_month() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 17).unwrap();
        assert_eq!(first_of_month(d), NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    }

    #[test]
    fn test_within_days_is_inclusive() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();

        let first_morning = Local.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let last_night = Local.with_ymd_and_hms(2025, 3, 2, 23, 59, 59).unwrap();
        let next_day = Local.with_ymd_and_hms(2025, 3, 3, 0, 30, 0).unwrap();

        assert!(within_days(&first_morning, start, end));
        assert!(within_days(&last_night, start, end));
        assert!(!within_days(&next_day, start, end));
    }

    #[test]
    fn test_parse_mock_time() {
        assert!(parse_mock_time("2025-12-25 14:30:00").is_some());
        assert!(parse_mock_time("2025-12-25T14:30:00").is_none());
        assert!(parse_mock_time("not a date").is_none());
    }

    #[test]
    fn test_now_returns_time() {
        let t = now();
        assert!(t.year() >= 2020);
        assert!(t.year() <= 2100);
    }

    #[test]
    fn test_mock_time_env_var_name() {
        assert_eq!(MOCK_TIME_ENV_VAR, "SAUNA_MOCK_TIME");
    }
}
