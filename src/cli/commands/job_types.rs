use crate::cli::parser::Commands;
use crate::core::fast::fast_job_types;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands) -> AppResult<()> {
    if let Commands::JobTypes = cmd {
        for jt in fast_job_types() {
            println!("{}", jt);
        }
    }
    Ok(())
}
