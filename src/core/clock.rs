//! Shift-clock engine: daily clock-in/out sessions with timezone-aware,
//! lunch-deducted duration accounting, plus the auto-clock-out sweep.

use chrono::{DateTime, Datelike, Duration, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::core::policy::ShiftPolicy;
use crate::db::log::oplog;
use crate::db::pool::DbPool;
use crate::db::store;
use crate::errors::{AppError, AppResult};
use crate::models::clock::{ClockSession, WorkerClock};
use crate::models::weekday::{day_from_name, day_name};
use crate::utils::time::{hours_between, overlap_hours};

#[derive(Debug, Serialize)]
pub struct ClockInReceipt {
    #[serde(rename = "workerID")]
    pub worker_id: String,
    #[serde(rename = "clockInTime")]
    pub clock_in_time: DateTime<Utc>,
    pub day: String,
}

/// Open a session. The recorded start snaps to the official start when the
/// actual time is within the grace window on either side of it.
pub fn clock_in(
    pool: &mut DbPool,
    policy: &ShiftPolicy,
    worker_id: &str,
    worker_name: &str,
    tz: Tz,
    now: DateTime<Utc>,
) -> AppResult<ClockInReceipt> {
    let tx = pool.conn.transaction()?;

    let mut worker = store::find_worker_clock(&tx, worker_id)?
        .unwrap_or_else(|| WorkerClock::new(worker_id, worker_name));

    if worker.has_open_session() {
        return Err(AppError::Conflict(format!(
            "Worker {} is already clocked in. Please clock out first.",
            worker_name
        )));
    }

    let official = policy.start_instant(tz, now);
    let grace = Duration::minutes(policy.grace_minutes);
    let clock_in_time = if now >= official - grace && now <= official + grace {
        official
    } else {
        now
    };

    let day = day_name(now.with_timezone(&tz).weekday()).to_string();
    worker.clock_ins.push(ClockSession {
        clock_in_time,
        clock_out_time: None,
        duration_hours: None,
        day: day.clone(),
    });

    store::save_worker_clock(&tx, &worker)?;
    oplog(&tx, "clock-in", worker_id, &format!("{} at {}", worker_name, clock_in_time))?;
    tx.commit()?;

    Ok(ClockInReceipt {
        worker_id: worker_id.to_string(),
        clock_in_time,
        day,
    })
}

#[derive(Debug, Serialize)]
pub struct ClockOutReceipt {
    #[serde(rename = "workerID")]
    pub worker_id: String,
    #[serde(rename = "clockOutTime")]
    pub clock_out_time: DateTime<Utc>,
    #[serde(rename = "durationHours")]
    pub duration_hours: f64,
    pub day: String,
}

/// Session duration in fractional hours: raw span minus the overlap with the
/// lunch window, clamped at zero (a session entirely inside lunch counts as
/// zero hours, never negative).
fn net_duration(
    policy: &ShiftPolicy,
    tz: Tz,
    clock_in: DateTime<Utc>,
    clock_out: DateTime<Utc>,
) -> f64 {
    let raw = hours_between(clock_in, clock_out);
    let (lunch_start, lunch_end) = policy.lunch_window(tz, clock_in);
    let lunch = overlap_hours(clock_in, clock_out, lunch_start, lunch_end);
    (raw - lunch).max(0.0)
}

fn close_session(
    policy: &ShiftPolicy,
    tz: Tz,
    session: &mut ClockSession,
    now: DateTime<Utc>,
) -> f64 {
    let official_end = policy.end_instant(tz, now);
    let clock_out_time = if now > official_end { official_end } else { now };

    let duration = net_duration(policy, tz, session.clock_in_time, clock_out_time);
    session.clock_out_time = Some(clock_out_time);
    session.duration_hours = Some(duration);
    duration
}

pub fn clock_out(
    pool: &mut DbPool,
    policy: &ShiftPolicy,
    worker_id: &str,
    worker_name: &str,
    tz: Tz,
    now: DateTime<Utc>,
) -> AppResult<ClockOutReceipt> {
    let tx = pool.conn.transaction()?;

    let mut worker = store::find_worker_clock(&tx, worker_id)?
        .ok_or_else(|| AppError::NotFound("Worker not found".into()))?;

    let (duration, clock_out_time, day) = {
        let session = worker.open_session_mut().ok_or_else(|| {
            AppError::Validation(format!("Worker {} is not clocked in.", worker_name))
        })?;
        let duration = close_session(policy, tz, session, now);
        (duration, session.clock_out_time.unwrap(), session.day.clone())
    };

    if let Some(weekday) = day_from_name(&day) {
        worker.worked_hours_per_day.add(weekday, duration);
    }
    worker.total_worked_hours += duration;

    store::save_worker_clock(&tx, &worker)?;
    oplog(
        &tx,
        "clock-out",
        worker_id,
        &format!("{} worked {:.2} hours on {}", worker_name, duration, day),
    )?;
    tx.commit()?;

    Ok(ClockOutReceipt {
        worker_id: worker_id.to_string(),
        clock_out_time,
        duration_hours: duration,
        day,
    })
}

#[derive(Debug, Serialize)]
pub struct SweepOutcome {
    #[serde(rename = "workersSwept")]
    pub workers_swept: usize,
    #[serde(rename = "sessionsClosed")]
    pub sessions_closed: usize,
}

/// Close every open session across all workers, using the same
/// official-end-or-now and lunch logic as a user clock-out. Idempotent:
/// already-closed sessions are never touched. Per-worker failures are
/// logged and do not abort the sweep.
pub fn auto_clock_out(
    pool: &mut DbPool,
    policy: &ShiftPolicy,
    tz: Tz,
    now: DateTime<Utc>,
) -> AppResult<SweepOutcome> {
    let workers = store::list_worker_clocks(&pool.conn)?;

    let mut workers_swept = 0;
    let mut sessions_closed = 0;

    for mut worker in workers {
        if !worker.has_open_session() {
            continue;
        }

        let mut closed_here = 0;
        let mut total_delta = 0.0;
        for session in worker.clock_ins.iter_mut().filter(|s| s.is_open()) {
            let duration = close_session(policy, tz, session, now);
            if let Some(weekday) = day_from_name(&session.day) {
                worker.worked_hours_per_day.add(weekday, duration);
            }
            total_delta += duration;
            closed_here += 1;
        }
        worker.total_worked_hours += total_delta;

        match store::save_worker_clock(&pool.conn, &worker) {
            Ok(()) => {
                workers_swept += 1;
                sessions_closed += closed_here;
                let _ = oplog(
                    &pool.conn,
                    "auto-clock-out",
                    &worker.worker_id,
                    &format!("closed {} session(s)", closed_here),
                );
            }
            Err(e) => {
                let _ = oplog(
                    &pool.conn,
                    "auto-clock-out",
                    &worker.worker_id,
                    &format!("sweep failed: {}", e),
                );
            }
        }
    }

    Ok(SweepOutcome {
        workers_swept,
        sessions_closed,
    })
}

/// Minimum clock-in instant across all workers' sessions, formatted.
pub fn earliest_clock_in(pool: &mut DbPool) -> AppResult<String> {
    let workers = store::list_worker_clocks(&pool.conn)?;

    let earliest = workers
        .iter()
        .flat_map(|w| w.clock_ins.iter())
        .map(|s| s.clock_in_time)
        .min()
        .ok_or_else(|| AppError::NotFound("No clock-in records found".into()))?;

    Ok(earliest.format("%Y-%m-%d %H:%M:%S").to_string())
}

#[derive(Debug, Serialize)]
pub struct OpenSessions {
    #[serde(rename = "workerID")]
    pub worker_id: String,
    #[serde(rename = "workerName")]
    pub worker_name: String,
    #[serde(rename = "openSessions")]
    pub open_sessions: Vec<ClockSession>,
}

/// Workers still holding at least one open session.
pub fn monitor_open_sessions(pool: &mut DbPool) -> AppResult<Vec<OpenSessions>> {
    let workers = store::list_worker_clocks(&pool.conn)?;

    Ok(workers
        .into_iter()
        .filter(|w| w.has_open_session())
        .map(|w| OpenSessions {
            worker_id: w.worker_id.clone(),
            worker_name: w.worker_name.clone(),
            open_sessions: w.clock_ins.into_iter().filter(|s| s.is_open()).collect(),
        })
        .collect())
}
