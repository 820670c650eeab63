#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Utc};
use std::env;
use std::fs;
use std::path::PathBuf;

use vinetally::db::initialize::init_db;
use vinetally::db::pool::DbPool;
use vinetally::db::store;
use vinetally::models::block::{Block, Row};

pub fn vt() -> Command {
    cargo_bin_cmd!("vinetally")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_vinetally.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Open a pool on the given path and run the schema migrations
pub fn open_pool(db_path: &str) -> DbPool {
    let pool = DbPool::new(db_path).expect("open db");
    init_db(&pool.conn).expect("init db");
    pool
}

/// Save a block with `rows` uniform rows of `stocks` vines each, numbered "1"..
pub fn seed_block(pool: &DbPool, name: &str, rows: u32, stocks: u32) {
    let block = Block {
        block_name: name.to_string(),
        variety: "Chenin Blanc".to_string(),
        total_stocks: rows * stocks,
        total_rows: rows,
        size_ha: 1.5,
        rows: (1..=rows)
            .map(|n| Row::new(n.to_string(), stocks, 0))
            .collect(),
    };
    store::save_block(&pool.conn, &block).expect("save block");
}

/// Parse an RFC 3339 instant, e.g. "2025-06-02T05:30:00Z"
pub fn at(s: &str) -> DateTime<Utc> {
    s.parse().expect("timestamp")
}

/// Initialize the DB schema via the CLI (as the field tooling does)
pub fn cli_init(db_path: &str) {
    vt()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}
