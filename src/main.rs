//! Replay Games - unified CLI.
//!
//! Dataset-driven tic-tac-toe replay with rubric evaluation.

use anyhow::Result;
use clap::Parser;
use replay_games::{Cli, Command, PlayStore, ServerConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            dataset,
            data_dir,
        } => run_server(config, host, port, dataset, data_dir).await,
        Command::Import { file, data_dir } => run_import(file, data_dir),
        Command::Show { limit, data_dir } => run_show(limit, data_dir),
    }
}

/// Run the HTTP replay server
async fn run_server(
    config: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    dataset: Option<PathBuf>,
    data_dir: Option<PathBuf>,
) -> Result<()> {
    let config = match config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    }
    .with_overrides(host, port, dataset, data_dir);

    info!("Starting replay server");
    replay_games::serve(config).await
}

/// Merge a plays file into the store
fn run_import(file: PathBuf, data_dir: PathBuf) -> Result<()> {
    let store = PlayStore::new(data_dir)?;
    let summary = store.import_plays(&file)?;
    println!(
        "Import complete: {} new, {} duplicate.",
        summary.new, summary.duplicate
    );
    Ok(())
}

/// Print the first stored plays
fn run_show(limit: usize, data_dir: PathBuf) -> Result<()> {
    let store = PlayStore::new(data_dir)?;
    for play in store.load_plays()?.iter().take(limit) {
        println!(
            "[{}] match {} player {} {} ({}): {}",
            play.timestamp, play.match_id, play.player, play.mv, play.model, play.reason
        );
    }
    Ok(())
}
