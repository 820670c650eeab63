//! Daily sweep scheduler: runs auto-clock-out at the official shift end in
//! the configured timezone, for workers who forgot to clock out.

use chrono::{DateTime, Duration, Utc};

use crate::core::clock::auto_clock_out;
use crate::core::policy::ShiftPolicy;
use crate::db::log::oplog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages;
use crate::utils::time::instant_today;

/// Next occurrence of the official end instant at or after `now`.
pub fn next_sweep_instant(policy: &ShiftPolicy, now: DateTime<Utc>) -> DateTime<Utc> {
    let tz = policy.default_timezone;
    let today_end = instant_today(tz, now, policy.official_end);
    if today_end > now {
        today_end
    } else {
        instant_today(tz, now + Duration::days(1), policy.official_end)
    }
}

/// Run the sweep once, against the configured timezone.
pub fn sweep_once(pool: &mut DbPool, policy: &ShiftPolicy, now: DateTime<Utc>) -> AppResult<()> {
    let outcome = auto_clock_out(pool, policy, policy.default_timezone, now)?;
    messages::success(format!(
        "Auto clock-out completed: {} session(s) closed for {} worker(s).",
        outcome.sessions_closed, outcome.workers_swept
    ));
    Ok(())
}

/// Blocking daemon loop: sleep until the next official end instant, sweep,
/// repeat. Sweep failures are logged and the loop continues.
pub fn run_daemon(pool: &mut DbPool, policy: &ShiftPolicy) -> AppResult<()> {
    messages::info(format!(
        "Sweep daemon started ({}, end of shift {}).",
        policy.default_timezone, policy.official_end
    ));

    loop {
        let now = Utc::now();
        let next = next_sweep_instant(policy, now);
        let wait = (next - now).to_std().unwrap_or_default();
        std::thread::sleep(wait);

        match auto_clock_out(pool, policy, policy.default_timezone, Utc::now()) {
            Ok(outcome) => messages::info(format!(
                "Sweep at {}: {} session(s) closed.",
                next, outcome.sessions_closed
            )),
            Err(e) => {
                messages::error(format!("Sweep failed: {}", e));
                let _ = oplog(&pool.conn, "sweep", "", &format!("failed: {}", e));
            }
        }

        // Guard against re-running within the same minute.
        std::thread::sleep(std::time::Duration::from_secs(60));
    }
}
