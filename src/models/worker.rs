use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::models::job_type::FastJobType;
use crate::models::weekday::day_name;

/// One accumulated completion entry, keyed by (block, row, job type) within
/// the owning worker. Repeated check-outs on the same key sum into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkEntry {
    pub row_number: String,
    pub job_type: String,
    pub stock_count: u32,
    #[serde(default)]
    pub time_spent: f64,
    pub date: DateTime<Utc>,
    pub day_of_week: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerBlock {
    pub block_name: String,
    pub rows: Vec<WorkEntry>,
}

/// Record of a batched offline sync, used to deduplicate replays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncLog {
    pub sync_id: String,
    pub device_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub time: DateTime<Utc>,
}

/// Regular piecework worker: check-in/check-out history plus derived totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worker {
    #[serde(rename = "workerID")]
    pub worker_id: String,
    pub name: String,
    /// Derived: sum of stock over non-fast entries. Recomputed before persist.
    #[serde(default)]
    pub total_stock_count: u32,
    /// Derived: sum of stock over fast-piecework entries.
    #[serde(default)]
    pub piecework_stock_count: u32,
    #[serde(default)]
    pub blocks: Vec<WorkerBlock>,
    #[serde(default)]
    pub sync_logs: Vec<SyncLog>,
    /// Last synced assignment, from offline clock-in batches.
    #[serde(default)]
    pub current_assignment: Option<SyncedAssignment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncedAssignment {
    pub block_name: String,
    pub row_number: String,
    pub job_type: String,
    pub clock_in_time: DateTime<Utc>,
}

impl Worker {
    pub fn new(worker_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            worker_id: worker_id.into(),
            name: name.into(),
            total_stock_count: 0,
            piecework_stock_count: 0,
            blocks: Vec::new(),
            sync_logs: Vec::new(),
            current_assignment: None,
        }
    }

    /// Add `stock` and `minutes` into the entry for (block, row, job type),
    /// creating block container and entry as needed. The entry date and day
    /// label are overwritten with the latest completion.
    pub fn upsert_entry(
        &mut self,
        block_name: &str,
        row_number: &str,
        job_type: &str,
        stock: u32,
        minutes: f64,
        at: DateTime<Utc>,
    ) {
        let day = day_name(at.weekday()).to_string();
        let block = match self.blocks.iter_mut().find(|b| b.block_name == block_name) {
            Some(b) => b,
            None => {
                self.blocks.push(WorkerBlock {
                    block_name: block_name.to_string(),
                    rows: Vec::new(),
                });
                self.blocks.last_mut().unwrap()
            }
        };

        match block
            .rows
            .iter_mut()
            .find(|r| r.row_number == row_number && r.job_type == job_type)
        {
            Some(entry) => {
                entry.stock_count += stock;
                entry.time_spent += minutes;
                entry.date = at;
                entry.day_of_week = day;
            }
            None => block.rows.push(WorkEntry {
                row_number: row_number.to_string(),
                job_type: job_type.to_string(),
                stock_count: stock,
                time_spent: minutes,
                date: at,
                day_of_week: day,
            }),
        }
    }

    /// Recompute both derived totals from the entries. Called by the engine
    /// after every mutation, before persisting.
    pub fn recompute_totals(&mut self) {
        let mut regular = 0;
        let mut fast = 0;
        for block in &self.blocks {
            for entry in &block.rows {
                if FastJobType::is_fast(&entry.job_type) {
                    fast += entry.stock_count;
                } else {
                    regular += entry.stock_count;
                }
            }
        }
        self.total_stock_count = regular;
        self.piecework_stock_count = fast;
    }

    pub fn has_sync(&self, sync_id: &str) -> bool {
        self.sync_logs.iter().any(|s| s.sync_id == sync_id)
    }
}
