use chrono::{DateTime, Utc};

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::clock_out;
use crate::core::policy::ShiftPolicy;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::time::parse_timezone;

pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<Utc>) -> AppResult<()> {
    if let Commands::ClockOut { worker, name, tz } = cmd {
        let policy = ShiftPolicy::from_config(cfg)?;
        let tz = match tz {
            Some(name) => parse_timezone(name)?,
            None => policy.default_timezone,
        };

        let mut pool = DbPool::new(&cfg.database)?;
        let receipt = clock_out(&mut pool, &policy, worker, name, tz, now)?;

        success(format!(
            "Worker {} clocked out successfully. Worked {:.2} hours on {}.",
            name, receipt.duration_hours, receipt.day
        ));
    }
    Ok(())
}
