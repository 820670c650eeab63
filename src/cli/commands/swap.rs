use chrono::{DateTime, Utc};

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::fast::{SwapRequest, swap_worker};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<Utc>) -> AppResult<()> {
    if let Commands::Swap {
        old_worker,
        new_worker,
        new_name,
        block,
        row,
        job,
        new_row,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        let receipt = swap_worker(
            &mut pool,
            &SwapRequest {
                old_worker_id: old_worker.clone(),
                new_worker_id: new_worker.clone(),
                new_worker_name: new_name.clone(),
                block_name: block.clone(),
                row_number: row.clone(),
                job_type: job.clone(),
                new_row_number: new_row.clone(),
            },
            now,
        )?;

        success(format!(
            "Worker {} successfully: row {} -> {} ({}).",
            receipt.action_type, receipt.old_row_number, receipt.new_row_number, receipt.new_worker
        ));
    }
    Ok(())
}
