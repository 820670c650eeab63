use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::earliest_clock_in;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Earliest = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        let earliest = earliest_clock_in(&mut pool)?;
        println!("Earliest clock-in: {}", earliest);
    }
    Ok(())
}
