use chrono::{DateTime, Utc};

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::policy::ShiftPolicy;
use crate::core::sweep::{run_daemon, sweep_once};
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<Utc>) -> AppResult<()> {
    if let Commands::Sweep { daemon } = cmd {
        let policy = ShiftPolicy::from_config(cfg)?;
        let mut pool = DbPool::new(&cfg.database)?;

        if *daemon {
            run_daemon(&mut pool, &policy)?;
        } else {
            sweep_once(&mut pool, &policy, now)?;
        }
    }
    Ok(())
}
