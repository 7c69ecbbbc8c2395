//! Crewroute Worker - computes crew routes from a task/building fixture
//!
//! Prints generated routes and routine summaries as JSON.

mod cli;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crewroute_worker::config::Config;
use crewroute_worker::services::providers::Fixture;
use crewroute_worker::RoutePlanner;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env file if present, before anything reads the environment
    dotenvy::dotenv().ok();

    // Logs directory - use LOGS_DIR env var or default to ./logs
    let logs_dir = std::env::var("LOGS_DIR")
        .unwrap_or_else(|_| "logs".to_string());
    std::fs::create_dir_all(&logs_dir).ok();

    // File appender for persistent logs (daily rotation)
    let file_appender = RollingFileAppender::new(
        Rotation::DAILY,
        &logs_dir,
        "crewroute.log",
    );
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // stdout carries the JSON result, so console logs go to stderr
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,crewroute_worker=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            return Err(e);
        }
    };
    info!("Configuration loaded: {:?}", config.schedule);

    let fixture = Fixture::load(&cli.fixture)?;
    let (tasks, buildings) = fixture.into_collaborators();
    info!("Loaded fixture {} with {} buildings", cli.fixture.display(), buildings.len());

    let planner = RoutePlanner::new(Arc::new(tasks), Arc::new(buildings), config.schedule.clone());

    let result = run(&planner, cli.command).await;
    if let Err(e) = &result {
        error!("Command failed: {:#}", e);
    }
    result
}

async fn run(planner: &RoutePlanner, command: Command) -> Result<()> {
    let output = match command {
        Command::Route { worker, date } => {
            let report = planner.analyze(worker, date).await?;
            serde_json::to_string_pretty(&report)?
        }
        Command::Summary { worker } => {
            let summary = planner.routine_summary(worker).await?;
            serde_json::to_string_pretty(&summary)?
        }
    };
    println!("{}", output);
    Ok(())
}
