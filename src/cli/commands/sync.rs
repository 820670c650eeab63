use std::fs;

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::sync::{SyncEntry, sync_clock_ins};
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Ingest a JSON batch of offline clock-in records and print the per-entry
/// multi-status results.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Sync { file } = cmd {
        let payload = fs::read_to_string(file)?;
        let entries: Vec<SyncEntry> = serde_json::from_str(&payload)?;

        let mut pool = DbPool::new(&cfg.database)?;
        let results = sync_clock_ins(&mut pool, &entries);

        println!("{}", serde_json::to_string_pretty(&results)?);
    }
    Ok(())
}
