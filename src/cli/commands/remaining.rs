use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::assignment::remaining_for_row;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Remaining { block, row, job } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        let remaining = remaining_for_row(&mut pool, block, row, job)?;
        println!(
            "Row {} in {}: {} of {} stocks remaining",
            remaining.row_number,
            remaining.block_name,
            remaining.remaining_stocks,
            remaining.original_stock_count
        );
    }
    Ok(())
}
