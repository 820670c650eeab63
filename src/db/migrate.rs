//! Schema creation and upgrades.
//!
//! Entities live as JSON documents, one table per kind, keyed by their
//! natural identity. Migrations are idempotent `ensure_*` steps in the order
//! the schema grew.

use rusqlite::{Connection, Result};

/// Create the four document tables.
fn ensure_document_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS blocks (
            block_name TEXT PRIMARY KEY,
            body       TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS workers (
            worker_id TEXT PRIMARY KEY,
            body      TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS piecework_workers (
            worker_id TEXT PRIMARY KEY,
            body      TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS worker_clocks (
            worker_id TEXT PRIMARY KEY,
            body      TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_document_tables(conn)?;
    ensure_log_table(conn)?;
    Ok(())
}
