mod common;
use common::{at, open_pool, setup_test_db};

use chrono_tz::Tz;
use vinetally::core::clock::{auto_clock_out, clock_in, clock_out};
use vinetally::core::policy::ShiftPolicy;
use vinetally::core::sweep::next_sweep_instant;
use vinetally::db::store;

fn tz() -> Tz {
    chrono_tz::Africa::Johannesburg
}

#[test]
fn test_sweep_closes_every_open_session() {
    let db = setup_test_db("sweep_closes");
    let mut pool = open_pool(&db);
    let policy = ShiftPolicy::default();

    clock_in(&mut pool, &policy, "W1", "Thandi", tz(), at("2025-06-02T05:30:00Z")).unwrap();
    clock_in(&mut pool, &policy, "W2", "Sipho", tz(), at("2025-06-02T06:30:00Z")).unwrap();
    // W3 already clocked out and must not be touched.
    clock_in(&mut pool, &policy, "W3", "Lindiwe", tz(), at("2025-06-02T05:30:00Z")).unwrap();
    clock_out(&mut pool, &policy, "W3", "Lindiwe", tz(), at("2025-06-02T13:00:00Z")).unwrap();

    // Sweep fires past the official end; recorded out time clamps to 15:30Z.
    let outcome =
        auto_clock_out(&mut pool, &policy, tz(), at("2025-06-02T16:00:00Z")).expect("sweep");
    assert_eq!(outcome.workers_swept, 2);
    assert_eq!(outcome.sessions_closed, 2);

    let w1 = store::find_worker_clock(&pool.conn, "W1").unwrap().unwrap();
    assert!(!w1.has_open_session());
    assert_eq!(w1.clock_ins[0].clock_out_time, Some(at("2025-06-02T15:30:00Z")));
    assert_eq!(w1.total_worked_hours, 9.0);

    // W2 started an hour later, so one hour less net.
    let w2 = store::find_worker_clock(&pool.conn, "W2").unwrap().unwrap();
    assert_eq!(w2.total_worked_hours, 8.0);

    // W3's earlier clock-out stands untouched.
    let w3 = store::find_worker_clock(&pool.conn, "W3").unwrap().unwrap();
    assert_eq!(w3.clock_ins[0].clock_out_time, Some(at("2025-06-02T13:00:00Z")));
}

#[test]
fn test_sweep_is_idempotent() {
    let db = setup_test_db("sweep_idempotent");
    let mut pool = open_pool(&db);
    let policy = ShiftPolicy::default();

    clock_in(&mut pool, &policy, "W1", "Thandi", tz(), at("2025-06-02T05:30:00Z")).unwrap();

    let first = auto_clock_out(&mut pool, &policy, tz(), at("2025-06-02T16:00:00Z")).unwrap();
    assert_eq!(first.sessions_closed, 1);

    let second = auto_clock_out(&mut pool, &policy, tz(), at("2025-06-02T16:30:00Z")).unwrap();
    assert_eq!(second.workers_swept, 0);
    assert_eq!(second.sessions_closed, 0);

    let worker = store::find_worker_clock(&pool.conn, "W1").unwrap().unwrap();
    assert_eq!(worker.total_worked_hours, 9.0);
}

#[test]
fn test_sweep_on_empty_database_is_a_no_op() {
    let db = setup_test_db("sweep_empty");
    let mut pool = open_pool(&db);
    let policy = ShiftPolicy::default();

    let outcome = auto_clock_out(&mut pool, &policy, tz(), at("2025-06-02T16:00:00Z")).unwrap();
    assert_eq!(outcome.workers_swept, 0);
    assert_eq!(outcome.sessions_closed, 0);
}

#[test]
fn test_next_sweep_instant_rolls_to_tomorrow_after_end() {
    let policy = ShiftPolicy::default();

    // Before today's 17:30 local end: sweep later today.
    assert_eq!(
        next_sweep_instant(&policy, at("2025-06-02T10:00:00Z")),
        at("2025-06-02T15:30:00Z")
    );

    // After the end: next occurrence is tomorrow.
    assert_eq!(
        next_sweep_instant(&policy, at("2025-06-02T16:00:00Z")),
        at("2025-06-03T15:30:00Z")
    );
}
