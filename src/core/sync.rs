//! Batched offline sync: field devices replay clock-in records when back in
//! coverage. Each entry succeeds or fails on its own (multi-status), and
//! replays are deduplicated by sync id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::log::oplog;
use crate::db::pool::DbPool;
use crate::db::store;
use crate::errors::AppResult;
use crate::models::worker::{SyncLog, SyncedAssignment, Worker};

#[derive(Debug, Clone, Deserialize)]
pub struct SyncEntry {
    #[serde(rename = "workerID", alias = "worker_id")]
    pub worker_id: String,
    #[serde(rename = "workerName", default)]
    pub worker_name: String,
    #[serde(rename = "blockName", alias = "blockId")]
    pub block_name: String,
    #[serde(rename = "rowNumber", alias = "row")]
    pub row_number: String,
    #[serde(rename = "jobType")]
    pub job_type: String,
    #[serde(rename = "clockInTime")]
    pub clock_in_time: DateTime<Utc>,
    #[serde(rename = "deviceId")]
    pub device_id: String,
    #[serde(rename = "syncId")]
    pub sync_id: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub enum SyncStatus {
    #[serde(rename = "success")]
    Success,
    #[serde(rename = "duplicate")]
    Duplicate,
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Serialize)]
pub struct SyncResult {
    #[serde(rename = "syncId")]
    pub sync_id: String,
    pub status: SyncStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn apply_entry(pool: &mut DbPool, entry: &SyncEntry) -> AppResult<SyncStatus> {
    let tx = pool.conn.transaction()?;

    let mut worker = store::find_worker(&tx, &entry.worker_id)?
        .unwrap_or_else(|| Worker::new(&entry.worker_id, &entry.worker_name));

    if worker.has_sync(&entry.sync_id) {
        return Ok(SyncStatus::Duplicate);
    }

    worker.current_assignment = Some(SyncedAssignment {
        block_name: entry.block_name.clone(),
        row_number: entry.row_number.clone(),
        job_type: entry.job_type.clone(),
        clock_in_time: entry.clock_in_time,
    });
    worker.sync_logs.push(SyncLog {
        sync_id: entry.sync_id.clone(),
        device_id: entry.device_id.clone(),
        kind: "clockIn".to_string(),
        time: entry.clock_in_time,
    });

    store::save_worker(&tx, &worker)?;
    oplog(&tx, "sync", &entry.worker_id, &format!("clockIn sync {}", entry.sync_id))?;
    tx.commit()?;
    Ok(SyncStatus::Success)
}

/// Ingest a batch, one result per entry. Never aborts the batch: an entry
/// that fails reports `error` and the rest proceed (HTTP 207 semantics).
pub fn sync_clock_ins(pool: &mut DbPool, entries: &[SyncEntry]) -> Vec<SyncResult> {
    let mut results = Vec::with_capacity(entries.len());

    for entry in entries {
        let result = match apply_entry(pool, entry) {
            Ok(status) => SyncResult {
                sync_id: entry.sync_id.clone(),
                status,
                error: None,
            },
            Err(e) => SyncResult {
                sync_id: entry.sync_id.clone(),
                status: SyncStatus::Error,
                error: Some(e.to_string()),
            },
        };
        results.push(result);
    }

    results
}
