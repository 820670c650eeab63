use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::assignment::clear_check_ins;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::ClearCheckIns = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        let cleared = clear_check_ins(&mut pool)?;
        success(format!("All active check-ins cleared ({}).", cleared));
    }
    Ok(())
}
