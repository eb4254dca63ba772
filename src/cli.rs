//! Command-line interface for replay_games.

use clap::{Parser, Subcommand};

/// Replay Games - dataset-driven tic-tac-toe with rubric evaluation
#[derive(Parser, Debug)]
#[command(name = "replay_games")]
#[command(about = "Replay recorded tic-tac-toe games and evaluate the moves", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP replay server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Path of the recorded-move dataset (overrides config)
        #[arg(long)]
        dataset: Option<std::path::PathBuf>,

        /// Directory for plays and evaluations (overrides config)
        #[arg(long)]
        data_dir: Option<std::path::PathBuf>,
    },

    /// Merge a plays file into the store, skipping duplicates
    Import {
        /// Plays file to import (JSON array)
        file: std::path::PathBuf,

        /// Directory for plays and evaluations
        #[arg(long, default_value = "data")]
        data_dir: std::path::PathBuf,
    },

    /// Print the first stored plays
    Show {
        /// Maximum number of plays to print
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Directory for plays and evaluations
        #[arg(long, default_value = "data")]
        data_dir: std::path::PathBuf,
    },
}
