use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::models::weekday::day_name;

/// One fast-piecework completion, keyed by (block, row, job type) within the
/// owning worker. A repeat on the same key (e.g. after a swap back) sums.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PieceworkEntry {
    pub row_number: String,
    pub job_type: String,
    pub stock_count: u32,
    pub date: DateTime<Utc>,
    pub day_of_week: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PieceworkBlock {
    pub block_name: String,
    pub rows: Vec<PieceworkEntry>,
}

/// Fast piecework worker: single-scan completions only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PieceworkWorker {
    #[serde(rename = "workerID")]
    pub worker_id: String,
    pub name: String,
    /// Derived: sum of stock over all entries. Recomputed before persist.
    #[serde(default)]
    pub piecework_stock_count: u32,
    #[serde(default)]
    pub blocks: Vec<PieceworkBlock>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PieceworkWorker {
    pub fn new(worker_id: impl Into<String>, name: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            worker_id: worker_id.into(),
            name: name.into(),
            piecework_stock_count: 0,
            blocks: Vec::new(),
            created_at: at,
            updated_at: at,
        }
    }

    pub fn upsert_entry(
        &mut self,
        block_name: &str,
        row_number: &str,
        job_type: &str,
        stock: u32,
        at: DateTime<Utc>,
    ) {
        let day = day_name(at.weekday()).to_string();
        let block = match self.blocks.iter_mut().find(|b| b.block_name == block_name) {
            Some(b) => b,
            None => {
                self.blocks.push(PieceworkBlock {
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
                entry.date = at;
                entry.day_of_week = day;
            }
            None => block.rows.push(PieceworkEntry {
                row_number: row_number.to_string(),
                job_type: job_type.to_string(),
                stock_count: stock,
                date: at,
                day_of_week: day,
            }),
        }
    }

    /// Remove the entry for (block, row, job type), pruning the block
    /// container when it empties. Returns the removed stock count.
    pub fn remove_entry(&mut self, block_name: &str, row_number: &str, job_type: &str) -> Option<u32> {
        let block_idx = self.blocks.iter().position(|b| b.block_name == block_name)?;
        let block = &mut self.blocks[block_idx];
        let row_idx = block
            .rows
            .iter()
            .position(|r| r.row_number == row_number && r.job_type == job_type)?;
        let removed = block.rows.remove(row_idx);
        if block.rows.is_empty() {
            self.blocks.remove(block_idx);
        }
        Some(removed.stock_count)
    }

    pub fn entry(&self, block_name: &str, row_number: &str, job_type: &str) -> Option<&PieceworkEntry> {
        self.blocks
            .iter()
            .find(|b| b.block_name == block_name)?
            .rows
            .iter()
            .find(|r| r.row_number == row_number && r.job_type == job_type)
    }

    pub fn recompute_totals(&mut self, at: DateTime<Utc>) {
        self.piecework_stock_count = self
            .blocks
            .iter()
            .flat_map(|b| b.rows.iter())
            .map(|r| r.stock_count)
            .sum();
        self.updated_at = at;
    }
}
