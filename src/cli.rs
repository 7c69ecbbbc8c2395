//! CLI argument parsing for the crewroute-worker binary.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "crewroute-worker", about = "Crew route generation and scheduling")]
pub struct Cli {
    /// JSON fixture with buildings and worker tasks
    #[arg(long, global = true, default_value = "fixture.json")]
    pub fixture: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a worker's route for a date, with conflicts and suggestions
    Route {
        #[arg(long)]
        worker: Uuid,
        /// Route date as ISO timestamp, e.g. 2026-03-02T08:00:00
        #[arg(long)]
        date: NaiveDateTime,
    },
    /// Summarize a worker's upcoming workload
    Summary {
        #[arg(long)]
        worker: Uuid,
    },
}
