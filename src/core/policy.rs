//! Shift policy: the official day boundaries and lunch window the clock
//! engine accounts against. Values come from configuration so tests can
//! inject arbitrary policies.

use chrono::{DateTime, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::config::Config;
use crate::errors::AppResult;
use crate::utils::time::{instant_on, instant_today, parse_time, parse_timezone};

#[derive(Debug, Clone)]
pub struct ShiftPolicy {
    /// Official shift start, local time (default 07:30).
    pub official_start: NaiveTime,
    /// Official shift end, local time (default 17:30).
    pub official_end: NaiveTime,
    pub lunch_start: NaiveTime,
    pub lunch_end: NaiveTime,
    /// Clock-ins within this many minutes of the official start snap to it.
    pub grace_minutes: i64,
    /// Timezone used by the sweep and when a request does not name one.
    pub default_timezone: Tz,
}

impl Default for ShiftPolicy {
    fn default() -> Self {
        Self {
            official_start: NaiveTime::from_hms_opt(7, 30, 0).unwrap(),
            official_end: NaiveTime::from_hms_opt(17, 30, 0).unwrap(),
            lunch_start: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            lunch_end: NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
            grace_minutes: 30,
            default_timezone: chrono_tz::Africa::Johannesburg,
        }
    }
}

impl ShiftPolicy {
    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        Ok(Self {
            official_start: parse_time(&cfg.shift_start)?,
            official_end: parse_time(&cfg.shift_end)?,
            lunch_start: parse_time(&cfg.lunch_start)?,
            lunch_end: parse_time(&cfg.lunch_end)?,
            grace_minutes: cfg.grace_minutes,
            default_timezone: parse_timezone(&cfg.timezone)?,
        })
    }

    /// Official start instant on `now`'s local date in `tz`.
    pub fn start_instant(&self, tz: Tz, now: DateTime<Utc>) -> DateTime<Utc> {
        instant_today(tz, now, self.official_start)
    }

    /// Official end instant on `now`'s local date in `tz`.
    pub fn end_instant(&self, tz: Tz, now: DateTime<Utc>) -> DateTime<Utc> {
        instant_today(tz, now, self.official_end)
    }

    /// Lunch window on the local date of `anchor` (the session's clock-in).
    pub fn lunch_window(&self, tz: Tz, anchor: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let date = anchor.with_timezone(&tz).date_naive();
        (
            instant_on(tz, date, self.lunch_start),
            instant_on(tz, date, self.lunch_end),
        )
    }
}
