//! Dataset records and loading.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info, instrument};

/// One recorded move from a previously played game.
///
/// `board` holds the state *after* the move was applied, as a raw sparse
/// cell list; `mv` holds the raw tagged move. Both stay undecoded until the
/// scan examines the record, so a malformed row survives loading and costs
/// only itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Symbol of the player who moved ("x" or "o").
    pub player: String,

    /// Board state after the move, as recorded.
    pub board: Value,

    /// The move, as recorded.
    #[serde(rename = "move")]
    pub mv: Value,

    /// Whether the move was legal when recorded (1 = legal).
    #[serde(default = "default_valid")]
    pub valid: i64,

    /// Free-text explanation from the source model.
    #[serde(default)]
    pub reason: String,

    /// Identifier of the source model.
    #[serde(default)]
    pub model: String,
}

#[instrument]
fn default_valid() -> i64 {
    1
}

/// Dataset error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Dataset error: {} at {}:{}", message, file, line)]
pub struct DatasetError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DatasetError {
    /// Creates a new dataset error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Loads the ordered move log from a JSON array file.
///
/// The log is read once at startup and scanned left to right afterwards;
/// nothing re-orders it.
///
/// # Errors
///
/// Returns [`DatasetError`] when the file cannot be read or is not a JSON
/// array of records.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Vec<MoveRecord>, DatasetError> {
    debug!("Loading move dataset");
    let content = std::fs::read_to_string(path.as_ref())
        .map_err(|e| DatasetError::new(format!("Failed to read dataset: {}", e)))?;

    let records: Vec<MoveRecord> = serde_json::from_str(&content)
        .map_err(|e| DatasetError::new(format!("Failed to parse dataset: {}", e)))?;

    info!(count = records.len(), "Dataset loaded");
    Ok(records)
}
