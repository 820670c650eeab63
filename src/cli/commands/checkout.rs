use chrono::{DateTime, Utc};

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::assignment::{CheckOutRequest, check_out};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<Utc>) -> AppResult<()> {
    if let Commands::CheckOut {
        worker,
        name,
        block,
        row,
        stock,
        job,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        let receipt = check_out(
            &mut pool,
            &CheckOutRequest {
                worker_id: worker.clone(),
                worker_name: name.clone(),
                block_name: block.clone(),
                row_number: row.clone(),
                stock_count: *stock,
                job_type: job.clone(),
            },
            now,
        )?;

        success(format!(
            "Check-out successful: {} stocks completed in {} ({}), {} remaining on row {}.",
            receipt.stock_completed,
            receipt.time_spent,
            receipt.job_type,
            receipt.remaining_stocks,
            receipt.row_number
        ));
    }
    Ok(())
}
