use predicates::str::contains;

mod common;
use common::{cli_init, setup_test_db, temp_out, vt};

fn seed(db: &str) {
    vt()
        .args([
            "--db",
            db,
            "seed-block",
            "Block A",
            "--variety",
            "Chenin Blanc",
            "--rows",
            "3",
            "--stocks-per-row",
            "100",
        ])
        .assert()
        .success()
        .stdout(contains("Block Block A created: 3 rows, 300 stocks total."));
}

#[test]
fn test_init_creates_database() {
    let db = setup_test_db("cli_init");
    vt()
        .args(["--db", &db, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized."));
}

#[test]
fn test_seed_block_rejects_duplicates() {
    let db = setup_test_db("cli_seed_dup");
    cli_init(&db);
    seed(&db);

    vt()
        .args([
            "--db",
            &db,
            "seed-block",
            "Block A",
            "--variety",
            "Shiraz",
            "--rows",
            "2",
            "--stocks-per-row",
            "10",
        ])
        .assert()
        .failure()
        .stderr(contains("Block Block A already exists"));
}

#[test]
fn test_check_in_check_out_flow() {
    let db = setup_test_db("cli_checkin_flow");
    cli_init(&db);
    seed(&db);

    vt()
        .args([
            "--db", &db, "--now", "2025-06-02T05:30:00Z",
            "check-in", "W1", "Thandi",
            "--block", "Block A", "--row", "1", "--job", "PRUNING",
        ])
        .assert()
        .success()
        .stdout(contains("Check-in successful: row 1 for PRUNING, 100 stocks to go."));

    vt()
        .args(["--db", &db, "status"])
        .assert()
        .success()
        .stdout(contains("Thandi (W1)"))
        .stdout(contains("PRUNING"));

    vt()
        .args([
            "--db", &db, "--now", "2025-06-02T07:45:00Z",
            "check-out", "W1", "Thandi",
            "--block", "Block A", "--row", "1", "--stock", "60",
        ])
        .assert()
        .success()
        .stdout(contains(
            "Check-out successful: 60 stocks completed in 2hr 15min (PRUNING), 40 remaining on row 1.",
        ));

    vt()
        .args(["--db", &db, "remaining", "--block", "Block A", "--row", "1"])
        .assert()
        .success()
        .stdout(contains("Row 1 in Block A: 40 of 100 stocks remaining"));
}

#[test]
fn test_double_check_in_fails_via_cli() {
    let db = setup_test_db("cli_double_checkin");
    cli_init(&db);
    seed(&db);

    vt()
        .args([
            "--db", &db, "--now", "2025-06-02T05:30:00Z",
            "check-in", "W1", "Thandi",
            "--block", "Block A", "--row", "1", "--job", "PRUNING",
        ])
        .assert()
        .success();

    vt()
        .args([
            "--db", &db, "--now", "2025-06-02T05:40:00Z",
            "check-in", "W1", "Thandi",
            "--block", "Block A", "--row", "1", "--job", "PRUNING",
        ])
        .assert()
        .failure()
        .stderr(contains("You are already checked in to Row 1 for PRUNING."));
}

#[test]
fn test_fast_check_in_and_repeat_scan() {
    let db = setup_test_db("cli_fast");
    cli_init(&db);
    seed(&db);

    vt()
        .args([
            "--db", &db, "--now", "2025-06-02T06:00:00Z",
            "fast-check-in", "W1", "Thandi",
            "--block", "Block A", "--row", "2", "--job", "LEAF PICKING",
        ])
        .assert()
        .success()
        .stdout(contains("Fast piecework entry successful: 100 vines on row 2 (LEAF PICKING)."));

    vt()
        .args([
            "--db", &db, "--now", "2025-06-02T06:05:00Z",
            "fast-check-in", "W2", "Sipho",
            "--block", "Block A", "--row", "2", "--job", "LEAF PICKING",
        ])
        .assert()
        .failure()
        .stderr(contains("Row 2 has already been completed for LEAF PICKING by Thandi."));
}

#[test]
fn test_swap_via_cli() {
    let db = setup_test_db("cli_swap");
    cli_init(&db);
    seed(&db);

    vt()
        .args([
            "--db", &db, "--now", "2025-06-02T06:00:00Z",
            "fast-check-in", "W1", "Thandi",
            "--block", "Block A", "--row", "2", "--job", "LEAF PICKING",
        ])
        .assert()
        .success();

    vt()
        .args([
            "--db", &db, "--now", "2025-06-02T07:00:00Z",
            "swap",
            "--old-worker", "W1",
            "--new-worker", "W2",
            "--new-name", "Sipho",
            "--block", "Block A", "--row", "2", "--job", "LEAF PICKING",
        ])
        .assert()
        .success()
        .stdout(contains("Worker swapped successfully: row 2 -> 2 (Sipho)."));
}

#[test]
fn test_totals_json_and_csv_export() {
    let db = setup_test_db("cli_totals");
    cli_init(&db);
    seed(&db);

    vt()
        .args([
            "--db", &db, "--now", "2025-06-02T06:00:00Z",
            "fast-check-in", "W1", "Thandi",
            "--block", "Block A", "--row", "1", "--job", "LEAF PICKING",
        ])
        .assert()
        .success();

    vt()
        .args(["--db", &db, "totals", "--json"])
        .assert()
        .success()
        .stdout(contains("\"totalVines\": 100"))
        .stdout(contains("\"status\": \"short\""));

    let out = temp_out("cli_totals", "csv");
    vt()
        .args(["--db", &db, "totals", "--csv", &out])
        .assert()
        .success()
        .stdout(contains("Report exported to"));
    let csv = std::fs::read_to_string(&out).expect("read export");
    assert!(csv.contains("W1,Thandi,Block A,1,LEAF PICKING,100,2025-06-02"));
}

#[test]
fn test_job_types_listing() {
    let db = setup_test_db("cli_job_types");
    cli_init(&db);

    vt()
        .args(["--db", &db, "job-types"])
        .assert()
        .success()
        .stdout(contains("LEAF PICKING"))
        .stdout(contains("SUCKER REMOVAL"))
        .stdout(contains("SHOOT THINNING"))
        .stdout(contains("OTHER"));
}

#[test]
fn test_clock_in_out_with_injected_now() {
    let db = setup_test_db("cli_clock");
    cli_init(&db);

    // 07:40 in Johannesburg snaps back to the official 07:30 start.
    vt()
        .args([
            "--db", &db, "--now", "2025-06-02T05:40:00Z",
            "clock-in", "W1", "Thandi",
        ])
        .assert()
        .success()
        .stdout(contains("Clock-in entry added successfully for Thandi at 07:30 (Monday)."));

    vt()
        .args([
            "--db", &db, "--now", "2025-06-02T15:30:00Z",
            "clock-out", "W1", "Thandi",
        ])
        .assert()
        .success()
        .stdout(contains("Worker Thandi clocked out successfully. Worked 9.00 hours on Monday."));

    vt()
        .args(["--db", &db, "earliest"])
        .assert()
        .success()
        .stdout(contains("Earliest clock-in: 2025-06-02 05:30:00"));
}

#[test]
fn test_sweep_once_closes_sessions() {
    let db = setup_test_db("cli_sweep");
    cli_init(&db);

    vt()
        .args([
            "--db", &db, "--now", "2025-06-02T05:30:00Z",
            "clock-in", "W1", "Thandi",
        ])
        .assert()
        .success();

    vt()
        .args(["--db", &db, "--now", "2025-06-02T16:00:00Z", "sweep"])
        .assert()
        .success()
        .stdout(contains("Auto clock-out completed: 1 session(s) closed for 1 worker(s)."));

    vt()
        .args(["--db", &db, "monitor"])
        .assert()
        .success()
        .stdout(contains("All workers have clocked out."));
}

#[test]
fn test_clear_check_ins_via_cli() {
    let db = setup_test_db("cli_clear");
    cli_init(&db);
    seed(&db);

    vt()
        .args([
            "--db", &db, "--now", "2025-06-02T05:30:00Z",
            "check-in", "W1", "Thandi",
            "--block", "Block A", "--row", "1", "--job", "PRUNING",
        ])
        .assert()
        .success();

    vt()
        .args(["--db", &db, "clear-check-ins"])
        .assert()
        .success()
        .stdout(contains("All active check-ins cleared (1)."));

    vt()
        .args(["--db", &db, "status"])
        .assert()
        .failure()
        .stderr(contains("No active check-ins found."));
}

#[test]
fn test_sync_batch_from_file() {
    let db = setup_test_db("cli_sync");
    cli_init(&db);

    let payload = temp_out("cli_sync_payload", "json");
    std::fs::write(
        &payload,
        r#"[
            {
                "workerID": "W1",
                "workerName": "Thandi",
                "blockName": "Block A",
                "rowNumber": "3",
                "jobType": "PRUNING",
                "clockInTime": "2025-06-02T05:30:00Z",
                "deviceId": "tablet-3",
                "syncId": "s-1"
            },
            {
                "workerID": "W1",
                "workerName": "Thandi",
                "blockName": "Block A",
                "rowNumber": "3",
                "jobType": "PRUNING",
                "clockInTime": "2025-06-02T05:30:00Z",
                "deviceId": "tablet-3",
                "syncId": "s-1"
            }
        ]"#,
    )
    .expect("write payload");

    vt()
        .args(["--db", &db, "sync", "--file", &payload])
        .assert()
        .success()
        .stdout(contains("\"status\": \"success\""))
        .stdout(contains("\"status\": \"duplicate\""));
}

#[test]
fn test_invalid_now_flag_is_rejected() {
    let db = setup_test_db("cli_bad_now");
    cli_init(&db);

    vt()
        .args(["--db", &db, "--now", "yesterday", "job-types"])
        .assert()
        .failure()
        .stderr(contains("Invalid time format: yesterday"));
}
