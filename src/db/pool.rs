//! SQLite connection wrapper (lightweight for CLI usage).
//!
//! The single exclusive connection also serializes engine mutations: paired
//! writes (block + worker) run inside one transaction on it, so the
//! "one active job per (row, job type)" and "one open session per worker"
//! invariants cannot be raced from this process.

use rusqlite::{Connection, Result};
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        Ok(Self { conn })
    }
}
