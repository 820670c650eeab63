use clap::{Parser, Subcommand};

/// Command-line interface definition for vinetally
/// Field labor tracking: row check-in/out, fast piecework, and shift clocking
#[derive(Parser)]
#[command(
    name = "vinetally",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track vineyard field labor: row check-in/out, piecework totals, and shift clocking with lunch deduction",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Override "now" with an RFC 3339 instant (deterministic runs)
    #[arg(global = true, long = "now", hide = true)]
    pub now: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Provision a block with uniform rows (administrative)
    SeedBlock {
        /// Block name
        name: String,

        #[arg(long, help = "Grape variety planted in the block")]
        variety: String,

        #[arg(long = "rows", help = "Number of rows to create")]
        rows: u32,

        #[arg(long = "stocks-per-row", help = "Vines per row")]
        stocks_per_row: u32,

        #[arg(long = "size-ha", default_value_t = 0.0, help = "Block size in hectares")]
        size_ha: f64,
    },

    /// Check a worker in to a row for a job
    CheckIn {
        /// Worker ID (scanned tag)
        worker: String,

        /// Worker display name
        name: String,

        #[arg(long, help = "Block name")]
        block: String,

        #[arg(long, help = "Row number within the block")]
        row: String,

        #[arg(long, help = "Job type, e.g. PRUNING")]
        job: String,
    },

    /// Check a worker out of a row, crediting completed stock
    CheckOut {
        worker: String,

        name: String,

        #[arg(long)]
        block: String,

        #[arg(long)]
        row: String,

        #[arg(long, help = "Stocks completed this session (default: all remaining)")]
        stock: Option<u32>,

        #[arg(long, help = "Job type (needed when the worker holds several jobs on the row)")]
        job: Option<String>,
    },

    /// One-shot fast piecework completion (single-scan job types)
    FastCheckIn {
        worker: String,

        name: String,

        #[arg(long)]
        block: String,

        #[arg(long)]
        row: String,

        #[arg(long, help = "Fast job type: LEAF PICKING, SUCKER REMOVAL, SHOOT THINNING, OTHER")]
        job: String,
    },

    /// Reassign a fast piecework completion to another worker
    Swap {
        #[arg(long = "old-worker", help = "Worker currently holding the completion")]
        old_worker: String,

        #[arg(long = "new-worker")]
        new_worker: String,

        #[arg(long = "new-name", help = "Display name of the new worker")]
        new_name: String,

        #[arg(long)]
        block: String,

        #[arg(long)]
        row: String,

        #[arg(long)]
        job: String,

        #[arg(long = "new-row", help = "Move the completion to this row")]
        new_row: Option<String>,
    },

    /// Fast piecework totals report
    Totals {
        #[arg(long, help = "Filter by job type")]
        job: Option<String>,

        #[arg(long, help = "Filter by completion date (YYYY-MM-DD)")]
        date: Option<String>,

        #[arg(long, value_name = "FILE", help = "Export the per-worker rows as CSV")]
        csv: Option<String>,

        #[arg(long, help = "Print the raw JSON report")]
        json: bool,
    },

    /// Show in-progress check-ins
    Status {
        #[arg(long, help = "Only this worker's check-ins")]
        worker: Option<String>,
    },

    /// Clear all in-progress check-ins (operational reset)
    ClearCheckIns,

    /// Remaining stocks for a row
    Remaining {
        #[arg(long)]
        block: String,

        #[arg(long)]
        row: String,

        #[arg(long, default_value = "PRUNING")]
        job: String,
    },

    /// List the fast piecework job types
    JobTypes,

    /// Clock a worker in to the daily shift
    ClockIn {
        worker: String,

        name: String,

        #[arg(long, help = "IANA timezone (default: configured zone)")]
        tz: Option<String>,
    },

    /// Clock a worker out, computing lunch-deducted hours
    ClockOut {
        worker: String,

        name: String,

        #[arg(long)]
        tz: Option<String>,
    },

    /// Run the auto-clock-out sweep (once, or as a daily daemon)
    Sweep {
        #[arg(long, help = "Keep running, sweeping at the official shift end every day")]
        daemon: bool,
    },

    /// Workers still holding an open clock session
    Monitor,

    /// Earliest clock-in on record
    Earliest,

    /// Ingest a batch of offline clock-in records (JSON array)
    Sync {
        #[arg(long, value_name = "FILE", help = "JSON file with the sync payload")]
        file: String,
    },

    /// Print the internal operation log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
