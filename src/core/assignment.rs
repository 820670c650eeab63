//! Work-assignment engine: row check-in / check-out reconciliation and
//! stock accounting for regular piecework jobs.
//!
//! All paired writes (block + worker) run in one transaction, so a storage
//! failure cannot leave the row and the worker history out of sync.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::log::oplog;
use crate::db::pool::DbPool;
use crate::db::store;
use crate::errors::{AppError, AppResult};
use crate::models::block::ActiveJob;
use crate::models::worker::Worker;
use crate::utils::formatting::format_minutes;
use crate::utils::time::minutes_between;

#[derive(Debug, Clone)]
pub struct CheckInRequest {
    pub worker_id: String,
    pub worker_name: String,
    pub block_name: String,
    pub row_number: String,
    pub job_type: String,
}

#[derive(Debug, Serialize)]
pub struct CheckInReceipt {
    #[serde(rename = "rowNumber")]
    pub row_number: String,
    #[serde(rename = "jobType")]
    pub job_type: String,
    #[serde(rename = "remainingStock")]
    pub remaining_stock: u32,
}

#[derive(Debug, Clone)]
pub struct CheckOutRequest {
    pub worker_id: String,
    pub worker_name: String,
    pub block_name: String,
    pub row_number: String,
    /// Stock completed this session; omitted means "everything remaining".
    pub stock_count: Option<u32>,
    /// Narrows the lookup when the worker holds several jobs on the row.
    pub job_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckOutReceipt {
    #[serde(rename = "stockCompleted")]
    pub stock_completed: u32,
    #[serde(rename = "timeSpent")]
    pub time_spent: String,
    #[serde(rename = "timeSpentMinutes")]
    pub time_spent_minutes: f64,
    #[serde(rename = "rowNumber")]
    pub row_number: String,
    #[serde(rename = "remainingStocks")]
    pub remaining_stocks: u32,
    #[serde(rename = "jobType")]
    pub job_type: String,
}

fn require(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("Missing required field: {}", field)));
    }
    Ok(())
}

/// Start a job on a row. The job's remaining stock resumes from a positive
/// carry-over left by a prior partial check-out, else the full row count.
pub fn check_in(
    pool: &mut DbPool,
    req: &CheckInRequest,
    now: DateTime<Utc>,
) -> AppResult<CheckInReceipt> {
    require("workerID", &req.worker_id)?;
    require("workerName", &req.worker_name)?;
    require("blockName", &req.block_name)?;
    require("rowNumber", &req.row_number)?;
    require("jobType", &req.job_type)?;

    let tx = pool.conn.transaction()?;

    let mut block = store::find_block(&tx, &req.block_name)?
        .ok_or_else(|| AppError::NotFound("Block not found".into()))?;

    let remaining = {
        let row = block
            .row_mut(&req.row_number)
            .ok_or_else(|| AppError::NotFound("Row not found".into()))?;

        if let Some(job) = row.job_of_type(&req.job_type) {
            if job.worker_id == req.worker_id {
                return Err(AppError::Conflict(format!(
                    "You are already checked in to Row {} for {}.",
                    req.row_number, req.job_type
                )));
            }
            return Err(AppError::Conflict(format!(
                "Row {} is currently being worked on by {} for {}.",
                req.row_number, job.worker_name, req.job_type
            )));
        }

        let remaining = row.starting_remaining(&req.job_type);
        row.active_jobs.push(ActiveJob {
            worker_id: req.worker_id.clone(),
            worker_name: req.worker_name.clone(),
            job_type: req.job_type.clone(),
            start_time: now,
            remaining_stock: remaining,
            time_spent: None,
        });
        remaining
    };

    store::save_block(&tx, &block)?;

    // Lazy-create the worker record on first check-in.
    if store::find_worker(&tx, &req.worker_id)?.is_none() {
        store::save_worker(&tx, &Worker::new(&req.worker_id, &req.worker_name))?;
    }

    oplog(
        &tx,
        "check-in",
        &req.worker_id,
        &format!(
            "{} row {} ({}) in block {}",
            req.worker_name, req.row_number, req.job_type, req.block_name
        ),
    )?;

    tx.commit()?;

    Ok(CheckInReceipt {
        row_number: req.row_number.clone(),
        job_type: req.job_type.clone(),
        remaining_stock: remaining,
    })
}

/// Close the worker's active job on a row, crediting completed stock to the
/// worker's history. The job record is always removed; a partial remainder
/// is carried on the row for the next check-in of the same job type.
pub fn check_out(
    pool: &mut DbPool,
    req: &CheckOutRequest,
    now: DateTime<Utc>,
) -> AppResult<CheckOutReceipt> {
    require("workerID", &req.worker_id)?;
    require("blockName", &req.block_name)?;
    require("rowNumber", &req.row_number)?;

    let tx = pool.conn.transaction()?;

    let mut block = store::find_block(&tx, &req.block_name)?
        .ok_or_else(|| AppError::NotFound("Block not found".into()))?;

    let (job_type, stock_completed, elapsed_minutes, remaining_after) = {
        let row = block
            .row_mut(&req.row_number)
            .ok_or_else(|| AppError::NotFound("Row not found".into()))?;

        let job_index = row
            .active_jobs
            .iter()
            .position(|j| {
                j.is_open()
                    && j.worker_id == req.worker_id
                    && req.job_type.as_deref().map_or(true, |t| j.job_type == t)
            })
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No active job found for {} on Row {}.",
                    req.worker_name, req.row_number
                ))
            })?;

        let job = &row.active_jobs[job_index];
        let job_type = job.job_type.clone();
        let elapsed_minutes = minutes_between(job.start_time, now);
        let current_remaining = job.remaining_stock;

        let stock_completed = match req.stock_count {
            None => current_remaining,
            Some(n) if n > current_remaining => {
                return Err(AppError::Validation(format!(
                    "Invalid stock count: cannot complete {} when only {} remain.",
                    n, current_remaining
                )));
            }
            Some(n) => n,
        };

        let remaining_after = current_remaining - stock_completed;
        row.carryover.insert(job_type.clone(), remaining_after);
        // Check-out always closes the job; partial completions re-check-in.
        row.active_jobs.remove(job_index);

        (job_type, stock_completed, elapsed_minutes, remaining_after)
    };

    store::save_block(&tx, &block)?;

    let mut worker = store::find_worker(&tx, &req.worker_id)?
        .unwrap_or_else(|| Worker::new(&req.worker_id, &req.worker_name));
    worker.upsert_entry(
        &req.block_name,
        &req.row_number,
        &job_type,
        stock_completed,
        elapsed_minutes,
        now,
    );
    worker.recompute_totals();
    store::save_worker(&tx, &worker)?;

    oplog(
        &tx,
        "check-out",
        &req.worker_id,
        &format!(
            "{} row {} ({}): {} stocks, {} left",
            req.worker_name, req.row_number, job_type, stock_completed, remaining_after
        ),
    )?;

    tx.commit()?;

    Ok(CheckOutReceipt {
        stock_completed,
        time_spent: format_minutes(elapsed_minutes),
        time_spent_minutes: elapsed_minutes,
        row_number: req.row_number.clone(),
        remaining_stocks: remaining_after,
        job_type,
    })
}

/// An in-progress occupancy, as reported by `active_check_ins`.
#[derive(Debug, Serialize)]
pub struct ActiveCheckIn {
    #[serde(rename = "blockName")]
    pub block_name: String,
    #[serde(rename = "rowNumber")]
    pub row_number: String,
    #[serde(rename = "jobType")]
    pub job_type: String,
    #[serde(rename = "workerID")]
    pub worker_id: String,
    #[serde(rename = "workerName")]
    pub worker_name: String,
    #[serde(rename = "startTime")]
    pub start_time: DateTime<Utc>,
    #[serde(rename = "remainingStocks")]
    pub remaining_stocks: u32,
}

/// All in-progress jobs across all blocks, optionally for one worker.
pub fn active_check_ins(pool: &mut DbPool, worker_id: Option<&str>) -> AppResult<Vec<ActiveCheckIn>> {
    let blocks = store::list_blocks(&pool.conn)?;

    let mut out = Vec::new();
    for block in &blocks {
        for row in &block.rows {
            for job in row.active_jobs.iter().filter(|j| j.is_open()) {
                if worker_id.map_or(true, |id| job.worker_id == id) {
                    out.push(ActiveCheckIn {
                        block_name: block.block_name.clone(),
                        row_number: row.row_number.clone(),
                        job_type: job.job_type.clone(),
                        worker_id: job.worker_id.clone(),
                        worker_name: job.worker_name.clone(),
                        start_time: job.start_time,
                        remaining_stocks: job.remaining_stock,
                    });
                }
            }
        }
    }

    if out.is_empty() {
        return Err(AppError::NotFound(match worker_id {
            Some(_) => "No active check-in found for this worker.".into(),
            None => "No active check-ins found.".into(),
        }));
    }
    Ok(out)
}

/// Operational reset: drop every in-progress job record. Completed
/// fast-piecework markers are kept so single-scan rows stay blocked.
pub fn clear_check_ins(pool: &mut DbPool) -> AppResult<usize> {
    let tx = pool.conn.transaction()?;

    let mut cleared = 0;
    let mut blocks = store::list_blocks(&tx)?;
    for block in &mut blocks {
        let mut dirty = false;
        for row in &mut block.rows {
            let before = row.active_jobs.len();
            row.active_jobs.retain(|j| !j.is_open());
            cleared += before - row.active_jobs.len();
            dirty = dirty || before != row.active_jobs.len();
        }
        if dirty {
            store::save_block(&tx, block)?;
        }
    }

    oplog(&tx, "clear-check-ins", "", &format!("{} active jobs cleared", cleared))?;
    tx.commit()?;
    Ok(cleared)
}

#[derive(Debug, Serialize)]
pub struct RowRemaining {
    #[serde(rename = "blockName")]
    pub block_name: String,
    #[serde(rename = "rowNumber")]
    pub row_number: String,
    #[serde(rename = "remainingStocks")]
    pub remaining_stocks: u32,
    #[serde(rename = "originalStockCount")]
    pub original_stock_count: u32,
}

/// Current remainder for a row (carry-over if any, else full capacity).
pub fn remaining_for_row(
    pool: &mut DbPool,
    block_name: &str,
    row_number: &str,
    job_type: &str,
) -> AppResult<RowRemaining> {
    let block = store::find_block(&pool.conn, block_name)?
        .ok_or_else(|| AppError::NotFound("Block not found".into()))?;
    let row = block
        .row(row_number)
        .ok_or_else(|| AppError::NotFound("Row not found in this block".into()))?;

    Ok(RowRemaining {
        block_name: block_name.to_string(),
        row_number: row.row_number.clone(),
        remaining_stocks: row.current_remaining(job_type),
        original_stock_count: row.stock_count,
    })
}
