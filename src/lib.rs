//! Replay Games library - dataset-driven tic-tac-toe replay
//!
//! This library replays a recorded log of tic-tac-toe moves against a live
//! game, scores each play against a seven-dimension rubric, and persists the
//! results for human review.
//!
//! # Architecture
//!
//! - **Games**: board values, moves, encodings, and rules for tic-tac-toe
//! - **Replay**: the recorded-move dataset and the matching scan
//! - **Rubric**: the seven-dimension evaluation rubric
//! - **Store**: JSON persistence for plays and evaluations
//! - **Session**: live game state and turn orchestration
//! - **Server**: HTTP API over one shared session
//!
//! # Example
//!
//! ```
//! use replay_games::{Board, Mark, ReplayMatcher};
//!
//! let mut matcher = ReplayMatcher::new(Vec::new());
//! let fallback = matcher.find_move(&Board::new(), Mark::X);
//! assert_eq!(fallback.model, replay_games::FALLBACK_MODEL);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod config;
mod games;
mod replay;
mod rubric;
mod server;
mod session;
mod store;

// Crate-level exports - CLI
pub use cli::{Cli, Command};

// Crate-level exports - Configuration
pub use config::{ConfigError, ServerConfig};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Board, CELL_TAG, FormatError, MOVE_TAG, Mark, Move, Outcome, Player, Square,
    board_from_cells, check_outcome, move_from_value, remove_mark,
};

// Crate-level exports - Replay
pub use replay::{
    DatasetError, FALLBACK_MODEL, FALLBACK_REASON, INVALID_MOVE_REASON, MoveRecord,
    ReplayMatcher, SuggestedMove, load_dataset,
};

// Crate-level exports - Rubric
pub use rubric::{Dimension, RubricScores, score_reason};

// Crate-level exports - Server
pub use server::{AppState, router, serve};

// Crate-level exports - Session
pub use session::{GameSession, TurnError, VerificationReport};

// Crate-level exports - Store
pub use store::{Evaluation, ImportSummary, PlayRecord, PlayStore, StoreError};
