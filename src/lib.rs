//! vinetally library root.
//! Exposes the CLI parser, the high-level run() function, and the internal
//! modules (engines, models, storage).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use chrono::{DateTime, Utc};
use clap::Parser;

use cli::parser::{Cli, Commands};
use config::Config;
use errors::{AppError, AppResult};

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, now: DateTime<Utc>) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::SeedBlock { .. } => cli::commands::seed_block::handle(&cli.command, cfg),
        Commands::CheckIn { .. } => cli::commands::checkin::handle(&cli.command, cfg, now),
        Commands::CheckOut { .. } => cli::commands::checkout::handle(&cli.command, cfg, now),
        Commands::FastCheckIn { .. } => cli::commands::fast_checkin::handle(&cli.command, cfg, now),
        Commands::Swap { .. } => cli::commands::swap::handle(&cli.command, cfg, now),
        Commands::Totals { .. } => cli::commands::totals::handle(&cli.command, cfg),
        Commands::Status { .. } => cli::commands::status::handle(&cli.command, cfg),
        Commands::ClearCheckIns => cli::commands::clear::handle(&cli.command, cfg),
        Commands::Remaining { .. } => cli::commands::remaining::handle(&cli.command, cfg),
        Commands::JobTypes => cli::commands::job_types::handle(&cli.command),
        Commands::ClockIn { .. } => cli::commands::clockin::handle(&cli.command, cfg, now),
        Commands::ClockOut { .. } => cli::commands::clockout::handle(&cli.command, cfg, now),
        Commands::Sweep { .. } => cli::commands::sweep::handle(&cli.command, cfg, now),
        Commands::Monitor => cli::commands::monitor::handle(&cli.command, cfg),
        Commands::Earliest => cli::commands::earliest::handle(&cli.command, cfg),
        Commands::Sync { .. } => cli::commands::sync::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;

    // Apply a database override from the command line
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    // Deterministic "now" for tests; wall clock otherwise.
    let now = match &cli.now {
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| AppError::InvalidTime(s.clone()))?,
        None => Utc::now(),
    };

    dispatch(&cli, &cfg, now)
}
