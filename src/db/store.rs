//! Document access over the entity tables: find-one / find-all / save /
//! delete per kind, with JSON bodies decoded into the model types.
//!
//! Functions take `&Connection` so they compose with transactions
//! (`rusqlite::Transaction` derefs to `Connection`).

use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::errors::AppResult;
use crate::models::block::Block;
use crate::models::clock::WorkerClock;
use crate::models::piecework::PieceworkWorker;
use crate::models::worker::Worker;

fn find_one<T: DeserializeOwned>(conn: &Connection, table: &str, key: &str) -> AppResult<Option<T>> {
    let sql = format!(
        "SELECT body FROM {} WHERE {} = ?1",
        table,
        key_column(table)
    );
    let body: Option<String> = conn
        .prepare_cached(&sql)?
        .query_row([key], |row| row.get(0))
        .optional()?;
    match body {
        Some(b) => Ok(Some(serde_json::from_str(&b)?)),
        None => Ok(None),
    }
}

fn find_all<T: DeserializeOwned>(conn: &Connection, table: &str) -> AppResult<Vec<T>> {
    let sql = format!(
        "SELECT body FROM {} ORDER BY {} ASC",
        table,
        key_column(table)
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(serde_json::from_str(&r?)?);
    }
    Ok(out)
}

fn save<T: Serialize>(conn: &Connection, table: &str, key: &str, doc: &T) -> AppResult<()> {
    let body = serde_json::to_string(doc)?;
    let sql = format!(
        "INSERT INTO {} ({}, body) VALUES (?1, ?2)
         ON CONFLICT({}) DO UPDATE SET body = excluded.body",
        table,
        key_column(table),
        key_column(table)
    );
    conn.prepare_cached(&sql)?.execute(params![key, body])?;
    Ok(())
}

fn key_column(table: &str) -> &'static str {
    match table {
        "blocks" => "block_name",
        _ => "worker_id",
    }
}

// ---------------------------
// Blocks
// ---------------------------

pub fn find_block(conn: &Connection, block_name: &str) -> AppResult<Option<Block>> {
    find_one(conn, "blocks", block_name)
}

pub fn list_blocks(conn: &Connection) -> AppResult<Vec<Block>> {
    find_all(conn, "blocks")
}

pub fn save_block(conn: &Connection, block: &Block) -> AppResult<()> {
    save(conn, "blocks", &block.block_name, block)
}

// ---------------------------
// Workers (regular piecework)
// ---------------------------

pub fn find_worker(conn: &Connection, worker_id: &str) -> AppResult<Option<Worker>> {
    find_one(conn, "workers", worker_id)
}

pub fn list_workers(conn: &Connection) -> AppResult<Vec<Worker>> {
    find_all(conn, "workers")
}

pub fn save_worker(conn: &Connection, worker: &Worker) -> AppResult<()> {
    save(conn, "workers", &worker.worker_id, worker)
}

// ---------------------------
// Piecework workers (fast)
// ---------------------------

pub fn find_piecework_worker(
    conn: &Connection,
    worker_id: &str,
) -> AppResult<Option<PieceworkWorker>> {
    find_one(conn, "piecework_workers", worker_id)
}

pub fn list_piecework_workers(conn: &Connection) -> AppResult<Vec<PieceworkWorker>> {
    find_all(conn, "piecework_workers")
}

pub fn save_piecework_worker(conn: &Connection, worker: &PieceworkWorker) -> AppResult<()> {
    save(conn, "piecework_workers", &worker.worker_id, worker)
}

// ---------------------------
// Worker clocks
// ---------------------------

pub fn find_worker_clock(conn: &Connection, worker_id: &str) -> AppResult<Option<WorkerClock>> {
    find_one(conn, "worker_clocks", worker_id)
}

pub fn list_worker_clocks(conn: &Connection) -> AppResult<Vec<WorkerClock>> {
    find_all(conn, "worker_clocks")
}

pub fn save_worker_clock(conn: &Connection, clock: &WorkerClock) -> AppResult<()> {
    save(conn, "worker_clocks", &clock.worker_id, clock)
}
