//! Aggregate reporting over fast-piecework completions: per-worker totals,
//! per-block completion percentages, and global block status.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::db::pool::DbPool;
use crate::db::store;
use crate::errors::AppResult;
use crate::models::block::Block;
use crate::utils::sort::natural_cmp;

#[derive(Debug, Default, Clone)]
pub struct TotalsFilter {
    pub job_type: Option<String>,
    /// UTC calendar date of the completion.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct WorkerRowTotal {
    #[serde(rename = "blockName")]
    pub block_name: String,
    #[serde(rename = "rowNumber")]
    pub row_number: String,
    pub vines: u32,
    #[serde(rename = "jobType")]
    pub job_type: String,
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct WorkerBlockCompletion {
    #[serde(rename = "blockName")]
    pub block_name: String,
    #[serde(rename = "expectedTotalVines")]
    pub expected_total_vines: u32,
    #[serde(rename = "workerCompletedVines")]
    pub worker_completed_vines: u32,
    #[serde(rename = "workerPercentage")]
    pub worker_percentage: f64,
    #[serde(rename = "workerCompletedRows")]
    pub worker_completed_rows: usize,
    #[serde(rename = "totalRowsInBlock")]
    pub total_rows_in_block: u32,
    pub variety: String,
}

#[derive(Debug, Serialize)]
pub struct WorkerTotals {
    #[serde(rename = "workerID")]
    pub worker_id: String,
    #[serde(rename = "workerName")]
    pub worker_name: String,
    #[serde(rename = "totalVines")]
    pub total_vines: u32,
    pub rows: Vec<WorkerRowTotal>,
    #[serde(rename = "blockCompletion")]
    pub block_completion: Vec<WorkerBlockCompletion>,
}

#[derive(Debug, Serialize)]
pub struct GlobalBlockStatus {
    #[serde(rename = "blockName")]
    pub block_name: String,
    #[serde(rename = "expectedVines")]
    pub expected_vines: u32,
    #[serde(rename = "actualVines")]
    pub actual_vines: u32,
    /// actual - expected
    pub difference: i64,
    #[serde(rename = "completionPercentage")]
    pub completion_percentage: f64,
    /// "complete" | "over" | "short"
    pub status: String,
    #[serde(rename = "completedRows")]
    pub completed_rows: usize,
    #[serde(rename = "totalRows")]
    pub total_rows: u32,
    pub variety: String,
    #[serde(rename = "completedRowNumbers")]
    pub completed_row_numbers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TotalsSummary {
    #[serde(rename = "totalWorkers")]
    pub total_workers: usize,
    #[serde(rename = "totalVines")]
    pub total_vines: u32,
}

#[derive(Debug, Serialize)]
pub struct TotalsReport {
    pub workers: Vec<WorkerTotals>,
    #[serde(rename = "globalBlockStatus")]
    pub global_block_status: Vec<GlobalBlockStatus>,
    pub summary: TotalsSummary,
}

#[derive(Default)]
struct Completion {
    vines: u32,
    rows: BTreeSet<String>,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Scan every piecework worker, apply the filters, and build the report.
pub fn fast_piecework_totals(pool: &mut DbPool, filter: &TotalsFilter) -> AppResult<TotalsReport> {
    let workers = store::list_piecework_workers(&pool.conn)?;
    let blocks = store::list_blocks(&pool.conn)?;
    let block_info: BTreeMap<&str, &Block> =
        blocks.iter().map(|b| (b.block_name.as_str(), b)).collect();

    let mut report_workers = Vec::new();
    let mut global: BTreeMap<String, Completion> = BTreeMap::new();

    for worker in &workers {
        let mut total = 0u32;
        let mut rows = Vec::new();
        let mut per_block: BTreeMap<String, Completion> = BTreeMap::new();

        for block in &worker.blocks {
            for entry in &block.rows {
                if let Some(jt) = &filter.job_type {
                    if &entry.job_type != jt {
                        continue;
                    }
                }
                if let Some(d) = filter.date {
                    if entry.date.date_naive() != d {
                        continue;
                    }
                }

                total += entry.stock_count;
                rows.push(WorkerRowTotal {
                    block_name: block.block_name.clone(),
                    row_number: entry.row_number.clone(),
                    vines: entry.stock_count,
                    job_type: entry.job_type.clone(),
                    date: entry.date.format("%Y-%m-%d").to_string(),
                });

                let mine = per_block.entry(block.block_name.clone()).or_default();
                mine.vines += entry.stock_count;
                mine.rows.insert(entry.row_number.clone());

                let all = global.entry(block.block_name.clone()).or_default();
                all.vines += entry.stock_count;
                all.rows.insert(entry.row_number.clone());
            }
        }

        if total == 0 {
            continue;
        }

        let mut block_completion = Vec::new();
        for (block_name, summary) in &per_block {
            if let Some(info) = block_info.get(block_name.as_str()) {
                block_completion.push(WorkerBlockCompletion {
                    block_name: block_name.clone(),
                    expected_total_vines: info.total_stocks,
                    worker_completed_vines: summary.vines,
                    worker_percentage: round2(
                        summary.vines as f64 / info.total_stocks as f64 * 100.0,
                    ),
                    worker_completed_rows: summary.rows.len(),
                    total_rows_in_block: info.total_rows,
                    variety: info.variety.clone(),
                });
            }
        }

        report_workers.push(WorkerTotals {
            worker_id: worker.worker_id.clone(),
            worker_name: worker.name.clone(),
            total_vines: total,
            rows,
            block_completion,
        });
    }

    let mut global_status = Vec::new();
    for (block_name, completion) in &global {
        if let Some(info) = block_info.get(block_name.as_str()) {
            let expected = info.total_stocks;
            let actual = completion.vines;
            let difference = actual as i64 - expected as i64;
            let status = if difference == 0 {
                "complete"
            } else if difference > 0 {
                "over"
            } else {
                "short"
            };

            let mut row_numbers: Vec<String> = completion.rows.iter().cloned().collect();
            row_numbers.sort_by(|a, b| natural_cmp(a, b));

            global_status.push(GlobalBlockStatus {
                block_name: block_name.clone(),
                expected_vines: expected,
                actual_vines: actual,
                difference,
                completion_percentage: round2(actual as f64 / expected as f64 * 100.0),
                status: status.to_string(),
                completed_rows: completion.rows.len(),
                total_rows: info.total_rows,
                variety: info.variety.clone(),
                completed_row_numbers: row_numbers,
            });
        }
    }

    report_workers.sort_by(|a, b| b.total_vines.cmp(&a.total_vines));
    global_status.sort_by(|a, b| natural_cmp(&a.block_name, &b.block_name));

    let summary = TotalsSummary {
        total_workers: report_workers.len(),
        total_vines: report_workers.iter().map(|w| w.total_vines).sum(),
    };

    Ok(TotalsReport {
        workers: report_workers,
        global_block_status: global_status,
        summary,
    })
}

/// Export the per-worker rows of a report as CSV.
pub fn write_csv(report: &TotalsReport, path: &str) -> AppResult<()> {
    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| crate::errors::AppError::Other(format!("CSV export failed: {}", e)))?;

    wtr.write_record(["workerID", "workerName", "blockName", "rowNumber", "jobType", "vines", "date"])
        .map_err(|e| crate::errors::AppError::Other(e.to_string()))?;

    for worker in &report.workers {
        for row in &worker.rows {
            wtr.write_record([
                worker.worker_id.as_str(),
                worker.worker_name.as_str(),
                row.block_name.as_str(),
                row.row_number.as_str(),
                row.job_type.as_str(),
                &row.vines.to_string(),
                row.date.as_str(),
            ])
            .map_err(|e| crate::errors::AppError::Other(e.to_string()))?;
        }
    }

    wtr.flush()?;
    Ok(())
}
