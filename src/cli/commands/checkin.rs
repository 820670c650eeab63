use chrono::{DateTime, Utc};

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::assignment::{CheckInRequest, check_in};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<Utc>) -> AppResult<()> {
    if let Commands::CheckIn {
        worker,
        name,
        block,
        row,
        job,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        let receipt = check_in(
            &mut pool,
            &CheckInRequest {
                worker_id: worker.clone(),
                worker_name: name.clone(),
                block_name: block.clone(),
                row_number: row.clone(),
                job_type: job.clone(),
            },
            now,
        )?;

        success(format!(
            "Check-in successful: row {} for {}, {} stocks to go.",
            receipt.row_number, receipt.job_type, receipt.remaining_stock
        ));
    }
    Ok(())
}
