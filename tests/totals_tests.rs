mod common;
use common::{at, open_pool, seed_block, setup_test_db, temp_out};

use vinetally::core::fast::{FastCheckInRequest, fast_check_in};
use vinetally::core::totals::{TotalsFilter, fast_piecework_totals, write_csv};

fn scan(worker: &str, name: &str, block: &str, row: &str, job: &str) -> FastCheckInRequest {
    FastCheckInRequest {
        worker_id: worker.to_string(),
        worker_name: name.to_string(),
        block_name: block.to_string(),
        row_number: row.to_string(),
        job_type: job.to_string(),
    }
}

/// Block A: 2 rows x 50 vines. Block B: 12 rows x 10 vines.
/// Thandi completes both rows of A; Sipho completes two rows of B.
fn seed_completions(pool: &mut vinetally::db::pool::DbPool) {
    seed_block(pool, "Block A", 2, 50);
    seed_block(pool, "Block B", 12, 10);

    let day1 = at("2025-06-02T08:00:00Z");
    let day2 = at("2025-06-03T08:00:00Z");

    fast_check_in(pool, &scan("W1", "Thandi", "Block A", "1", "LEAF PICKING"), day1).unwrap();
    fast_check_in(pool, &scan("W1", "Thandi", "Block A", "2", "LEAF PICKING"), day2).unwrap();
    fast_check_in(pool, &scan("W2", "Sipho", "Block B", "2", "LEAF PICKING"), day1).unwrap();
    fast_check_in(pool, &scan("W2", "Sipho", "Block B", "10", "SUCKER REMOVAL"), day1).unwrap();
}

#[test]
fn test_report_totals_and_block_status() {
    let db = setup_test_db("totals_report");
    let mut pool = open_pool(&db);
    seed_completions(&mut pool);

    let report = fast_piecework_totals(&mut pool, &TotalsFilter::default()).unwrap();

    // Workers ordered by total vines, descending.
    assert_eq!(report.workers.len(), 2);
    assert_eq!(report.workers[0].worker_id, "W1");
    assert_eq!(report.workers[0].total_vines, 100);
    assert_eq!(report.workers[1].worker_id, "W2");
    assert_eq!(report.workers[1].total_vines, 20);

    // Per-worker block completion percentages.
    let w1_block = &report.workers[0].block_completion[0];
    assert_eq!(w1_block.block_name, "Block A");
    assert_eq!(w1_block.worker_percentage, 100.0);
    assert_eq!(w1_block.worker_completed_rows, 2);

    let w2_block = &report.workers[1].block_completion[0];
    assert_eq!(w2_block.worker_percentage, 16.67);

    // Global status: A is complete, B is short.
    assert_eq!(report.global_block_status.len(), 2);
    let a = &report.global_block_status[0];
    assert_eq!(a.block_name, "Block A");
    assert_eq!(a.status, "complete");
    assert_eq!(a.difference, 0);
    assert_eq!(a.completion_percentage, 100.0);

    let b = &report.global_block_status[1];
    assert_eq!(b.status, "short");
    assert_eq!(b.difference, -100);
    assert_eq!(b.completed_rows, 2);
    // Natural row ordering: "2" sorts ahead of "10".
    assert_eq!(b.completed_row_numbers, vec!["2", "10"]);

    assert_eq!(report.summary.total_workers, 2);
    assert_eq!(report.summary.total_vines, 120);
}

#[test]
fn test_job_type_filter_narrows_the_report() {
    let db = setup_test_db("totals_job_filter");
    let mut pool = open_pool(&db);
    seed_completions(&mut pool);

    let filter = TotalsFilter {
        job_type: Some("SUCKER REMOVAL".to_string()),
        date: None,
    };
    let report = fast_piecework_totals(&mut pool, &filter).unwrap();

    assert_eq!(report.workers.len(), 1);
    assert_eq!(report.workers[0].worker_id, "W2");
    assert_eq!(report.workers[0].total_vines, 10);
    assert_eq!(report.summary.total_vines, 10);
}

#[test]
fn test_date_filter_narrows_the_report() {
    let db = setup_test_db("totals_date_filter");
    let mut pool = open_pool(&db);
    seed_completions(&mut pool);

    let filter = TotalsFilter {
        job_type: None,
        date: Some("2025-06-03".parse().unwrap()),
    };
    let report = fast_piecework_totals(&mut pool, &filter).unwrap();

    // Only Thandi's second scan happened on the 3rd.
    assert_eq!(report.workers.len(), 1);
    assert_eq!(report.workers[0].total_vines, 50);
    assert_eq!(report.workers[0].rows.len(), 1);
    assert_eq!(report.workers[0].rows[0].row_number, "2");
    assert_eq!(report.workers[0].rows[0].date, "2025-06-03");
}

#[test]
fn test_empty_report() {
    let db = setup_test_db("totals_empty");
    let mut pool = open_pool(&db);
    seed_block(&pool, "Block A", 2, 50);

    let report = fast_piecework_totals(&mut pool, &TotalsFilter::default()).unwrap();
    assert!(report.workers.is_empty());
    assert!(report.global_block_status.is_empty());
    assert_eq!(report.summary.total_workers, 0);
    assert_eq!(report.summary.total_vines, 0);
}

#[test]
fn test_over_completion_status_after_swap_to_extra_row() {
    let db = setup_test_db("totals_over");
    let mut pool = open_pool(&db);
    seed_block(&pool, "Block C", 1, 30);

    fast_check_in(
        &mut pool,
        &scan("W1", "Thandi", "Block C", "1", "LEAF PICKING"),
        at("2025-06-02T08:00:00Z"),
    )
    .unwrap();
    fast_check_in(
        &mut pool,
        &scan("W2", "Sipho", "Block C", "1", "SUCKER REMOVAL"),
        at("2025-06-02T09:00:00Z"),
    )
    .unwrap();

    // Two job types on one 30-vine block: 60 actual against 30 expected.
    let report = fast_piecework_totals(&mut pool, &TotalsFilter::default()).unwrap();
    let c = &report.global_block_status[0];
    assert_eq!(c.status, "over");
    assert_eq!(c.difference, 30);
    assert_eq!(c.completion_percentage, 200.0);
}

#[test]
fn test_csv_export_contains_per_worker_rows() {
    let db = setup_test_db("totals_csv");
    let mut pool = open_pool(&db);
    seed_completions(&mut pool);

    let report = fast_piecework_totals(&mut pool, &TotalsFilter::default()).unwrap();
    let out = temp_out("totals_csv", "csv");
    write_csv(&report, &out).expect("export csv");

    let contents = std::fs::read_to_string(&out).expect("read csv");
    let mut lines = contents.lines();
    assert_eq!(
        lines.next().unwrap(),
        "workerID,workerName,blockName,rowNumber,jobType,vines,date"
    );
    assert!(contents.contains("W1,Thandi,Block A,1,LEAF PICKING,50,2025-06-02"));
    assert!(contents.contains("W2,Sipho,Block B,10,SUCKER REMOVAL,10,2025-06-02"));
    // Header plus one line per completion entry.
    assert_eq!(contents.lines().count(), 5);
}
