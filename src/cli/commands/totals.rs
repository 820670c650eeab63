use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::totals::{TotalsFilter, fast_piecework_totals, write_csv};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::table::Table;
use crate::utils::time::parse_date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Totals {
        job,
        date,
        csv,
        json,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        let filter = TotalsFilter {
            job_type: job.clone(),
            date: date.as_deref().map(parse_date).transpose()?,
        };
        let report = fast_piecework_totals(&mut pool, &filter)?;

        if let Some(path) = csv {
            write_csv(&report, path)?;
            success(format!("Report exported to {}", path));
            return Ok(());
        }

        if *json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        let mut workers = Table::new(&["Worker", "Name", "Vines"]);
        for w in &report.workers {
            workers.add_row(vec![
                w.worker_id.clone(),
                w.worker_name.clone(),
                w.total_vines.to_string(),
            ]);
        }
        print!("{}", workers.render());

        let mut blocks = Table::new(&["Block", "Expected", "Actual", "Diff", "Status", "Rows"]);
        for b in &report.global_block_status {
            blocks.add_row(vec![
                b.block_name.clone(),
                b.expected_vines.to_string(),
                b.actual_vines.to_string(),
                b.difference.to_string(),
                b.status.clone(),
                format!("{}/{}", b.completed_rows, b.total_rows),
            ]);
        }
        print!("{}", blocks.render());

        println!(
            "{} workers, {} vines total",
            report.summary.total_workers, report.summary.total_vines
        );
    }
    Ok(())
}
