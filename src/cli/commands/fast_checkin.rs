use chrono::{DateTime, Utc};

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::fast::{FastCheckInRequest, fast_check_in};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<Utc>) -> AppResult<()> {
    if let Commands::FastCheckIn {
        worker,
        name,
        block,
        row,
        job,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        let receipt = fast_check_in(
            &mut pool,
            &FastCheckInRequest {
                worker_id: worker.clone(),
                worker_name: name.clone(),
                block_name: block.clone(),
                row_number: row.clone(),
                job_type: job.clone(),
            },
            now,
        )?;

        success(format!(
            "Fast piecework entry successful: {} vines on row {} ({}).",
            receipt.vines_completed, receipt.row_number, receipt.job_type
        ));
    }
    Ok(())
}
