//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent, and each variant maps onto the HTTP-style status
//! code the sync boundary reports (400 / 404 / 409 / 500).

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Document decode error: {0}")]
    Decode(#[from] serde_json::Error),

    // ---------------------------
    // Request validation
    // ---------------------------
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid job type: {0}")]
    InvalidJobType(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    // ---------------------------
    // Engine outcomes
    // ---------------------------
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// HTTP-style status code for the sync boundary.
    pub fn status(&self) -> u16 {
        match self {
            AppError::Validation(_)
            | AppError::InvalidJobType(_)
            | AppError::InvalidTimezone(_)
            | AppError::InvalidTime(_)
            | AppError::InvalidDate(_) => 400,
            AppError::NotFound(_) => 404,
            AppError::Conflict(_) => 409,
            _ => 500,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
