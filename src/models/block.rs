use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An in-progress or completed job occupying a row.
///
/// Regular piecework jobs have `time_spent = None` while open and are removed
/// from the row at check-out. Fast piecework jobs are written already closed
/// (`remaining_stock = 0`, `time_spent` set) and stay on the row as the
/// completion marker that blocks a repeat scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveJob {
    pub worker_id: String,
    pub worker_name: String,
    pub job_type: String,
    pub start_time: DateTime<Utc>,
    pub remaining_stock: u32,
    /// Minutes. `Some` marks a completed single-scan record.
    #[serde(default)]
    pub time_spent: Option<f64>,
}

impl ActiveJob {
    pub fn is_open(&self) -> bool {
        self.time_spent.is_none()
    }
}

/// A planted row inside a block. Row numbers are strings ("12", "12A")
/// unique within their block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    pub row_number: String,
    /// Vines/trees in this row (fixed capacity of work units).
    pub stock_count: u32,
    #[serde(default)]
    pub bunches: u32,
    #[serde(default)]
    pub active_jobs: Vec<ActiveJob>,
    /// Remaining stock carried over per job type after a partial check-out,
    /// so the next check-in on that job type resumes instead of resetting.
    #[serde(default)]
    pub carryover: BTreeMap<String, u32>,
}

impl Row {
    pub fn new(row_number: impl Into<String>, stock_count: u32, bunches: u32) -> Self {
        Self {
            row_number: row_number.into(),
            stock_count,
            bunches,
            active_jobs: Vec::new(),
            carryover: BTreeMap::new(),
        }
    }

    /// Any record (open or completed) of the given job type on this row.
    pub fn job_of_type(&self, job_type: &str) -> Option<&ActiveJob> {
        self.active_jobs.iter().find(|j| j.job_type == job_type)
    }

    /// Starting remainder for a new job of `job_type`: a positive carry-over
    /// from a prior incomplete session, else the full stock count.
    pub fn starting_remaining(&self, job_type: &str) -> u32 {
        match self.carryover.get(job_type) {
            Some(&rem) if rem > 0 => rem,
            _ => self.stock_count,
        }
    }

    /// Current remainder shown to callers asking about this row.
    pub fn current_remaining(&self, job_type: &str) -> u32 {
        self.carryover
            .get(job_type)
            .copied()
            .unwrap_or(self.stock_count)
    }
}

/// A named block of rows. Provisioned administratively; mutated in place by
/// the work-assignment engine for its whole life.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub block_name: String,
    pub variety: String,
    pub total_stocks: u32,
    pub total_rows: u32,
    #[serde(default)]
    pub size_ha: f64,
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl Block {
    pub fn row(&self, row_number: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.row_number == row_number)
    }

    pub fn row_mut(&mut self, row_number: &str) -> Option<&mut Row> {
        self.rows.iter_mut().find(|r| r.row_number == row_number)
    }
}
