use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::store;
use crate::errors::{AppError, AppResult};
use crate::models::block::{Block, Row};
use crate::ui::messages::success;

/// Provision a block with uniform rows. Administrative convenience for
/// operations and tests; production blocks come from the farm survey import.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::SeedBlock {
        name,
        variety,
        rows,
        stocks_per_row,
        size_ha,
    } = cmd
    {
        if *rows == 0 {
            return Err(AppError::Validation("A block needs at least one row".into()));
        }

        let mut pool = DbPool::new(&cfg.database)?;

        if store::find_block(&pool.conn, name)?.is_some() {
            return Err(AppError::Conflict(format!("Block {} already exists", name)));
        }

        let block = Block {
            block_name: name.clone(),
            variety: variety.clone(),
            total_stocks: rows * stocks_per_row,
            total_rows: *rows,
            size_ha: *size_ha,
            rows: (1..=*rows)
                .map(|n| Row::new(n.to_string(), *stocks_per_row, 0))
                .collect(),
        };
        store::save_block(&pool.conn, &block)?;

        success(format!(
            "Block {} created: {} rows, {} stocks total.",
            name, rows, block.total_stocks
        ));
    }
    Ok(())
}
