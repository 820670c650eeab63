//! Fixed-size per-weekday hour accumulator.
//!
//! Replaces the stringly-keyed day-name map of the legacy schema with an
//! array indexed by `chrono::Weekday`, while still serializing as the named
//! map ("Monday": 7.5, ...) the sync clients expect.

use chrono::Weekday;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Hours worked per weekday, Monday-first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeekHours([f64; 7]);

impl WeekHours {
    pub fn get(&self, day: Weekday) -> f64 {
        self.0[day.num_days_from_monday() as usize]
    }

    pub fn add(&mut self, day: Weekday, hours: f64) {
        self.0[day.num_days_from_monday() as usize] += hours;
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }
}

/// Full weekday name, e.g. "Monday". Stored on clock sessions.
pub fn day_name(day: Weekday) -> &'static str {
    DAY_NAMES[day.num_days_from_monday() as usize]
}

pub fn day_from_name(name: &str) -> Option<Weekday> {
    DAY_NAMES.iter().position(|d| *d == name).map(|i| match i {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        _ => Weekday::Sun,
    })
}

impl Serialize for WeekHours {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(7))?;
        for (name, hours) in DAY_NAMES.iter().zip(self.0.iter()) {
            map.serialize_entry(name, hours)?;
        }
        map.end()
    }
}

struct WeekHoursVisitor;

impl<'de> Visitor<'de> for WeekHoursVisitor {
    type Value = WeekHours;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of weekday name to hours")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<WeekHours, A::Error> {
        let mut hours = WeekHours::default();
        while let Some((name, value)) = access.next_entry::<String, f64>()? {
            // Unknown day names (legacy records never stored Sunday) are skipped.
            if let Some(idx) = DAY_NAMES.iter().position(|d| *d == name) {
                hours.0[idx] = value;
            }
        }
        Ok(hours)
    }
}

impl<'de> Deserialize<'de> for WeekHours {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<WeekHours, D::Error> {
        deserializer.deserialize_map(WeekHoursVisitor)
    }
}
