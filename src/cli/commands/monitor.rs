use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::monitor_open_sessions;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Monitor = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        let open = monitor_open_sessions(&mut pool)?;

        if open.is_empty() {
            info("All workers have clocked out.");
            return Ok(());
        }

        for worker in &open {
            println!(
                "{} ({}): {} open session(s), first since {}",
                worker.worker_name,
                worker.worker_id,
                worker.open_sessions.len(),
                worker.open_sessions[0]
                    .clock_in_time
                    .format("%Y-%m-%d %H:%M")
            );
        }
    }
    Ok(())
}
