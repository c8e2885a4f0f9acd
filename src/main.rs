//! # Service Snapshots CLI (`svcsnap`)
//!
//! The `svcsnap` binary drives the snapshot materialization pipeline:
//! database initialization, demo seeding, the denormalization run itself,
//! JSON export, and database statistics.
//!
//! ## Usage
//!
//! ```bash
//! svcsnap --config ./config/svcsnap.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `svcsnap init` | Create the SQLite database and run schema migrations |
//! | `svcsnap seed` | Insert a small demo dataset |
//! | `svcsnap materialize` | Rebuild the snapshot table from source data |
//! | `svcsnap export` | Dump snapshot rows as JSON |
//! | `svcsnap stats` | Show source and snapshot counts |

mod aggregate;
mod config;
mod db;
mod eligibility;
mod emit;
mod export;
mod fallback;
mod materialize;
mod migrate;
mod models;
mod prose;
mod schedule;
mod seed;
mod stats;
mod store;
mod taxonomy;
mod view;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Service Snapshots CLI — denormalizes service-directory data into flat,
/// embedding-ready snapshot rows.
#[derive(Parser)]
#[command(
    name = "svcsnap",
    about = "Denormalizes service-directory data into flat, embedding-ready snapshot rows",
    version,
    long_about = "svcsnap reads a normalized relational snapshot of organizations, services, \
    addresses, schedules, categories, and eligibility tags, resolves all fallback and taxonomy \
    rules, and rebuilds one snapshot row per (service, address) pair with a deterministic \
    embedding-text block. Embedding vectors themselves are produced by an external collaborator."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/svcsnap.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file, all source tables, and the
    /// snapshot table. Idempotent — running it multiple times is safe.
    Init,

    /// Insert a small demo dataset into an initialized database.
    Seed,

    /// Rebuild the snapshot table from the current source data.
    ///
    /// Reads a point-in-time view of every source table, runs the
    /// denormalization pass, and atomically replaces the snapshot table.
    /// Schedule records with malformed time codes are reported and their
    /// service skipped; the rest of the run proceeds.
    Materialize {
        /// Show row and violation counts without writing to the database.
        #[arg(long)]
        dry_run: bool,

        /// Maximum number of snapshot rows to write.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Dump the snapshot table as JSON.
    Export {
        /// Write to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show source and snapshot row counts.
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Seed => {
            seed::run_seed(&cfg).await?;
        }
        Commands::Materialize { dry_run, limit } => {
            materialize::run_materialize(&cfg, dry_run, limit).await?;
        }
        Commands::Export { output } => {
            export::run_export(&cfg, output.as_deref()).await?;
        }
        Commands::Stats => {
            stats::run_stats(&cfg).await?;
        }
    }

    Ok(())
}
