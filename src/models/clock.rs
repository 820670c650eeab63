use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::weekday::WeekHours;

/// One daily clock session. `clock_out_time` and `duration_hours` stay unset
/// until the worker clocks out or the sweep closes the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockSession {
    pub clock_in_time: DateTime<Utc>,
    #[serde(default)]
    pub clock_out_time: Option<DateTime<Utc>>,
    /// Fractional hours net of lunch, set at close.
    #[serde(default)]
    pub duration_hours: Option<f64>,
    /// Weekday name of the clock-in, e.g. "Monday".
    pub day: String,
}

impl ClockSession {
    pub fn is_open(&self) -> bool {
        self.clock_out_time.is_none()
    }
}

/// Per-worker shift-clock record. Invariant: at most one open session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerClock {
    #[serde(rename = "workerID")]
    pub worker_id: String,
    #[serde(rename = "workerName")]
    pub worker_name: String,
    #[serde(default)]
    pub clock_ins: Vec<ClockSession>,
    #[serde(default)]
    pub worked_hours_per_day: WeekHours,
    #[serde(default)]
    pub total_worked_hours: f64,
}

impl WorkerClock {
    pub fn new(worker_id: impl Into<String>, worker_name: impl Into<String>) -> Self {
        Self {
            worker_id: worker_id.into(),
            worker_name: worker_name.into(),
            clock_ins: Vec::new(),
            worked_hours_per_day: WeekHours::default(),
            total_worked_hours: 0.0,
        }
    }

    pub fn open_session(&self) -> Option<&ClockSession> {
        self.clock_ins.iter().find(|s| s.is_open())
    }

    pub fn open_session_mut(&mut self) -> Option<&mut ClockSession> {
        self.clock_ins.iter_mut().find(|s| s.is_open())
    }

    pub fn has_open_session(&self) -> bool {
        self.open_session().is_some()
    }
}
