//! Exchange-time helpers. All timestamps are stored as UTC and interpreted in
//! America/New_York, the zone the US market calendar runs on.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc, Weekday};
use chrono_tz::America::New_York;

/// Hour (exchange time) on Friday after which the display week rolls forward.
const FRIDAY_ROLLOVER_HOUR: u32 = 18;

/// Whether `then` is more than `max_age` before `now`. A missing timestamp is always stale.
pub fn is_older_than(then: Option<DateTime<Utc>>, max_age: Duration, now: DateTime<Utc>) -> bool {
    match then {
        None => true,
        Some(then) => now.signed_duration_since(then) > max_age,
    }
}

/// Whether two instants fall on different New York calendar dates.
pub fn is_different_trading_day(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => {
            a.with_timezone(&New_York).date_naive() != b.with_timezone(&New_York).date_naive()
        }
        _ => true,
    }
}

/// Wall-clock time in New York, e.g. `"09:30 AM"`.
pub fn format_est_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&New_York).format("%I:%M %p").to_string()
}

/// Monday..Friday of the week the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayWeek {
    pub monday: NaiveDate,
    pub friday: NaiveDate,
}

impl DisplayWeek {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.monday && date <= self.friday
    }

    pub fn key(&self) -> String {
        week_key(self.monday)
    }
}

/// The current New York trading week. From Friday 18:00 through Sunday the
/// upcoming week is shown instead.
pub fn display_week(now: DateTime<Utc>) -> DisplayWeek {
    let local = now.with_timezone(&New_York);
    let today = local.date_naive();

    let reference = match local.weekday() {
        Weekday::Fri if local.hour() >= FRIDAY_ROLLOVER_HOUR => today + Duration::days(3),
        Weekday::Sat => today + Duration::days(2),
        Weekday::Sun => today + Duration::days(1),
        _ => today,
    };

    let monday = reference - Duration::days(i64::from(reference.weekday().num_days_from_monday()));
    DisplayWeek {
        monday,
        friday: monday + Duration::days(4),
    }
}

/// `"YYYY-WW"` cache key for the week starting at `monday`.
///
/// Week numbers count from the Sunday-aligned week containing January 1st.
pub fn week_key(monday: NaiveDate) -> String {
    let year = monday.year();
    let jan1_offset = NaiveDate::from_ymd_opt(year, 1, 1)
        .map(|d| d.weekday().num_days_from_sunday())
        .unwrap_or(0);
    let days = monday.ordinal0() + jan1_offset + 1;
    let week = days.div_ceil(7);
    format!("{}-{:02}", year, week)
}
