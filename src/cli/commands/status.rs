use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::assignment::active_check_ins;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { worker } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        let checkins = active_check_ins(&mut pool, worker.as_deref())?;

        let mut table = Table::new(&["Block", "Row", "Job", "Worker", "Since", "Remaining"]);
        for c in &checkins {
            table.add_row(vec![
                c.block_name.clone(),
                c.row_number.clone(),
                c.job_type.clone(),
                format!("{} ({})", c.worker_name, c.worker_id),
                c.start_time.format("%Y-%m-%d %H:%M").to_string(),
                c.remaining_stocks.to_string(),
            ]);
        }
        print!("{}", table.render());
    }
    Ok(())
}
