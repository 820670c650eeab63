//! Time utilities: timezone resolution, official-instant construction,
//! interval overlap, elapsed-minute computation.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::errors::{AppError, AppResult};

/// Resolve an IANA timezone name ("Africa/Johannesburg", "UTC", ...).
pub fn parse_timezone(name: &str) -> AppResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| AppError::InvalidTimezone(name.to_string()))
}

pub fn parse_time(t: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").map_err(|_| AppError::InvalidTime(t.to_string()))
}

pub fn parse_date(d: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(d, "%Y-%m-%d").map_err(|_| AppError::InvalidDate(d.to_string()))
}

/// The UTC instant of `time` on `date` in `tz`. DST gaps and folds resolve
/// to the earliest valid interpretation.
pub fn instant_on(tz: Tz, date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&date.and_time(time)) {
        chrono::LocalResult::Single(dt) => dt.with_timezone(&Utc),
        chrono::LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        chrono::LocalResult::None => {
            // Spring-forward gap: fall back to the same wall time one hour later.
            let shifted = date.and_time(time) + chrono::Duration::hours(1);
            tz.from_local_datetime(&shifted)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|| Utc.from_utc_datetime(&date.and_time(time)))
        }
    }
}

/// The UTC instant of `time` today (in `tz`), relative to `now`.
pub fn instant_today(tz: Tz, now: DateTime<Utc>, time: NaiveTime) -> DateTime<Utc> {
    let local_date = now.with_timezone(&tz).date_naive();
    instant_on(tz, local_date, time)
}

/// Overlap between [a_start, a_end) and [b_start, b_end) in fractional hours,
/// never negative.
pub fn overlap_hours(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> f64 {
    let start = a_start.max(b_start);
    let end = a_end.min(b_end);
    if end > start {
        (end - start).num_seconds() as f64 / 3600.0
    } else {
        0.0
    }
}

pub fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_seconds() as f64 / 3600.0
}

pub fn minutes_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_seconds() as f64 / 60.0
}
