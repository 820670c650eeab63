//! Fast piecework: single-scan jobs completed in one step, and the swap/move
//! operation that reassigns a completion between workers.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::log::oplog;
use crate::db::pool::DbPool;
use crate::db::store;
use crate::errors::{AppError, AppResult};
use crate::models::block::ActiveJob;
use crate::models::job_type::FastJobType;
use crate::models::piecework::PieceworkWorker;

#[derive(Debug, Clone)]
pub struct FastCheckInRequest {
    pub worker_id: String,
    pub worker_name: String,
    pub block_name: String,
    pub row_number: String,
    pub job_type: String,
}

#[derive(Debug, Serialize)]
pub struct FastCheckInReceipt {
    #[serde(rename = "workerName")]
    pub worker_name: String,
    #[serde(rename = "rowNumber")]
    pub row_number: String,
    #[serde(rename = "blockName")]
    pub block_name: String,
    #[serde(rename = "jobType")]
    pub job_type: String,
    #[serde(rename = "vinesCompleted")]
    pub vines_completed: u32,
}

/// One-shot completion: validates the fast job type, marks the row done for
/// that type, and credits the full row count to the piecework worker. A
/// degenerate check-in + check-out performed atomically.
pub fn fast_check_in(
    pool: &mut DbPool,
    req: &FastCheckInRequest,
    now: DateTime<Utc>,
) -> AppResult<FastCheckInReceipt> {
    let fast_type = FastJobType::jt_from_str(&req.job_type).ok_or_else(|| {
        AppError::InvalidJobType(format!(
            "Invalid job type for fast piecework. Must be one of: {}",
            FastJobType::ALL
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    })?;
    let job_type = fast_type.as_str();

    let tx = pool.conn.transaction()?;

    let mut block = store::find_block(&tx, &req.block_name)?
        .ok_or_else(|| AppError::NotFound("Block not found".into()))?;

    let stock_count = {
        let row = block
            .row_mut(&req.row_number)
            .ok_or_else(|| AppError::NotFound("Row not found".into()))?;

        // Single-scan jobs may not be repeated: any record of this type,
        // open or completed, blocks the scan.
        if let Some(existing) = row.job_of_type(job_type) {
            return Err(AppError::Conflict(format!(
                "Row {} has already been completed for {} by {}.",
                req.row_number, job_type, existing.worker_name
            )));
        }

        let stock_count = row.stock_count;
        row.active_jobs.push(ActiveJob {
            worker_id: req.worker_id.clone(),
            worker_name: req.worker_name.clone(),
            job_type: job_type.to_string(),
            start_time: now,
            remaining_stock: 0,
            time_spent: Some(1.0),
        });
        stock_count
    };

    store::save_block(&tx, &block)?;

    let mut worker = store::find_piecework_worker(&tx, &req.worker_id)?
        .unwrap_or_else(|| PieceworkWorker::new(&req.worker_id, &req.worker_name, now));
    worker.upsert_entry(&req.block_name, &req.row_number, job_type, stock_count, now);
    worker.recompute_totals(now);
    store::save_piecework_worker(&tx, &worker)?;

    oplog(
        &tx,
        "fast-check-in",
        &req.worker_id,
        &format!(
            "{} row {} ({}) in block {}: {} vines",
            req.worker_name, req.row_number, job_type, req.block_name, stock_count
        ),
    )?;

    tx.commit()?;

    Ok(FastCheckInReceipt {
        worker_name: req.worker_name.clone(),
        row_number: req.row_number.clone(),
        block_name: req.block_name.clone(),
        job_type: job_type.to_string(),
        vines_completed: stock_count,
    })
}

#[derive(Debug, Clone)]
pub struct SwapRequest {
    pub old_worker_id: String,
    pub new_worker_id: String,
    pub new_worker_name: String,
    pub block_name: String,
    pub row_number: String,
    pub job_type: String,
    /// When set, the completion also moves to this row.
    pub new_row_number: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SwapReceipt {
    #[serde(rename = "oldWorker")]
    pub old_worker: String,
    #[serde(rename = "newWorker")]
    pub new_worker: String,
    #[serde(rename = "blockName")]
    pub block_name: String,
    #[serde(rename = "oldRowNumber")]
    pub old_row_number: String,
    #[serde(rename = "newRowNumber")]
    pub new_row_number: String,
    #[serde(rename = "actionType")]
    pub action_type: String,
}

/// Reassign a fast-piecework completion from one worker to another,
/// optionally moving it to a different row in the same block.
pub fn swap_worker(
    pool: &mut DbPool,
    req: &SwapRequest,
    now: DateTime<Utc>,
) -> AppResult<SwapReceipt> {
    let job_type = FastJobType::jt_from_str(&req.job_type)
        .ok_or_else(|| AppError::InvalidJobType(req.job_type.clone()))?
        .as_str();
    let target_row_number = req
        .new_row_number
        .clone()
        .unwrap_or_else(|| req.row_number.clone());

    let tx = pool.conn.transaction()?;

    let mut block = store::find_block(&tx, &req.block_name)?
        .ok_or_else(|| AppError::NotFound("Block not found".into()))?;

    // Source job must exist before anything mutates.
    {
        let source_row = block
            .row(&req.row_number)
            .ok_or_else(|| AppError::NotFound("Original row not found".into()))?;
        source_row
            .active_jobs
            .iter()
            .find(|j| j.worker_id == req.old_worker_id && j.job_type == job_type)
            .ok_or_else(|| {
                AppError::NotFound("No matching job found for the specified worker".into())
            })?;
    }

    let target_stock = {
        let target_row = block
            .row(&target_row_number)
            .ok_or_else(|| AppError::NotFound("Target row not found".into()))?;

        if target_row
            .active_jobs
            .iter()
            .any(|j| j.worker_id == req.new_worker_id && j.job_type == job_type)
        {
            return Err(AppError::Conflict(format!(
                "{} is already working on row {} with job type {}",
                req.new_worker_name, target_row_number, job_type
            )));
        }
        target_row.stock_count
    };

    // Remove the completion from the old worker's piecework record.
    if let Some(mut old_worker) = store::find_piecework_worker(&tx, &req.old_worker_id)? {
        if old_worker
            .remove_entry(&req.block_name, &req.row_number, job_type)
            .is_some()
        {
            old_worker.recompute_totals(now);
            store::save_piecework_worker(&tx, &old_worker)?;
        }
    }

    // Detach from the source row, attach to the target row.
    {
        let source_row = block.row_mut(&req.row_number).unwrap();
        let idx = source_row
            .active_jobs
            .iter()
            .position(|j| j.worker_id == req.old_worker_id && j.job_type == job_type)
            .unwrap();
        source_row.active_jobs.remove(idx);
    }
    {
        let target_row = block.row_mut(&target_row_number).unwrap();
        target_row.active_jobs.push(ActiveJob {
            worker_id: req.new_worker_id.clone(),
            worker_name: req.new_worker_name.clone(),
            job_type: job_type.to_string(),
            start_time: now,
            remaining_stock: 0,
            time_spent: Some(1.0),
        });
    }
    store::save_block(&tx, &block)?;

    let mut new_worker = store::find_piecework_worker(&tx, &req.new_worker_id)?
        .unwrap_or_else(|| PieceworkWorker::new(&req.new_worker_id, &req.new_worker_name, now));
    new_worker.upsert_entry(&req.block_name, &target_row_number, job_type, target_stock, now);
    new_worker.recompute_totals(now);
    store::save_piecework_worker(&tx, &new_worker)?;

    let action_type = if target_row_number != req.row_number {
        "moved"
    } else {
        "swapped"
    };

    oplog(
        &tx,
        "swap",
        &req.new_worker_id,
        &format!(
            "{} row {} -> {} ({}) from {}",
            action_type, req.row_number, target_row_number, job_type, req.old_worker_id
        ),
    )?;

    tx.commit()?;

    Ok(SwapReceipt {
        old_worker: req.old_worker_id.clone(),
        new_worker: req.new_worker_name.clone(),
        block_name: req.block_name.clone(),
        old_row_number: req.row_number.clone(),
        new_row_number: target_row_number,
        action_type: action_type.to_string(),
    })
}

/// The enumerated fast set, as wire labels.
pub fn fast_job_types() -> Vec<&'static str> {
    FastJobType::ALL.iter().map(|t| t.as_str()).collect()
}
