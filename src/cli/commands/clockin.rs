use chrono::{DateTime, Utc};

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::clock_in;
use crate::core::policy::ShiftPolicy;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::time::parse_timezone;

pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<Utc>) -> AppResult<()> {
    if let Commands::ClockIn { worker, name, tz } = cmd {
        let policy = ShiftPolicy::from_config(cfg)?;
        let tz = match tz {
            Some(name) => parse_timezone(name)?,
            None => policy.default_timezone,
        };

        let mut pool = DbPool::new(&cfg.database)?;
        let receipt = clock_in(&mut pool, &policy, worker, name, tz, now)?;

        success(format!(
            "Clock-in entry added successfully for {} at {} ({}).",
            name,
            receipt.clock_in_time.with_timezone(&tz).format("%H:%M"),
            receipt.day
        ));
    }
    Ok(())
}
