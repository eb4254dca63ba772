//! JSON-file persistence for plays, evaluations, and audit records.

use crate::games::tictactoe::{Board, Move, Outcome, Player};
use crate::rubric::{Dimension, RubricScores};
use chrono::Local;
use derive_more::{Display, Error};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

/// One applied turn, as persisted for later review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayRecord {
    /// Turn number within the game, 1-based. Evaluations key on this.
    pub match_id: u32,

    /// The player who moved.
    pub player: Player,

    /// The applied move.
    #[serde(rename = "move")]
    pub mv: Move,

    /// Reason text returned by the matcher (recorded or sentinel).
    pub reason: String,

    /// Source model identifier returned by the matcher.
    pub model: String,

    /// Outcome after the move.
    pub outcome: Outcome,

    /// Board snapshot after the move.
    pub board: Board,

    /// Automatic rubric scores for the reason text.
    pub scores: RubricScores,

    /// Whether a human evaluation has been recorded.
    #[serde(default)]
    pub evaluated: bool,

    /// When the turn was played.
    pub timestamp: String,
}

/// A human review of one play.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    /// Turn number the reviewed play belongs to.
    pub match_id: u32,
    /// The player who made the reviewed play.
    pub player: Player,
    /// Source model of the reviewed play.
    pub model: String,
    /// The reviewed move.
    #[serde(rename = "move")]
    pub mv: Move,
    /// Per-dimension scores assigned by the reviewer.
    pub scores: RubricScores,
    /// Free-text comment from the reviewer.
    #[serde(default)]
    pub comment: String,
    /// When the review was recorded.
    pub evaluated_at: String,
}

/// Summary of a plays-file import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Records added to the store.
    pub new: usize,
    /// Records skipped as already present.
    pub duplicate: usize,
}

/// Store error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
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

/// File-backed store for plays, evaluations, and audit lines.
///
/// Files live under one data directory and are whole-file JSON documents,
/// rewritten on every append. Small histories make that cheap, and it keeps
/// the files hand-readable for review.
#[derive(Debug, Clone)]
pub struct PlayStore {
    data_dir: PathBuf,
}

impl PlayStore {
    /// Opens a store rooted at the given directory, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the directory cannot be created.
    #[instrument(skip(data_dir), fields(data_dir = %data_dir.as_ref().display()))]
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir)
            .map_err(|e| StoreError::new(format!("Failed to create data dir: {}", e)))?;
        info!(path = %data_dir.display(), "Opened play store");
        Ok(Self { data_dir })
    }

    fn plays_path(&self) -> PathBuf {
        self.data_dir.join("plays.json")
    }

    fn evaluations_path(&self) -> PathBuf {
        self.data_dir.join("evaluations.json")
    }

    fn audit_path(&self) -> PathBuf {
        self.data_dir.join("history.log")
    }

    fn verification_path(&self) -> PathBuf {
        self.data_dir.join("board_comparison.json")
    }

    /// Loads all stored plays; an absent file is an empty history.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on a read or parse failure.
    #[instrument(skip(self))]
    pub fn load_plays(&self) -> Result<Vec<PlayRecord>, StoreError> {
        read_json_list(&self.plays_path())
    }

    /// Rewrites the plays file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on a write failure.
    #[instrument(skip(self, plays), fields(count = plays.len()))]
    pub fn save_plays(&self, plays: &[PlayRecord]) -> Result<(), StoreError> {
        write_json(&self.plays_path(), &plays)
    }

    /// Appends one play and its audit line.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on a read or write failure.
    #[instrument(skip(self, play), fields(match_id = play.match_id))]
    pub fn append_play(&self, play: &PlayRecord) -> Result<(), StoreError> {
        let mut plays = self.load_plays()?;
        plays.push(play.clone());
        self.save_plays(&plays)?;
        self.append_audit(play)?;
        debug!(total = plays.len(), "Play appended");
        Ok(())
    }

    /// Loads all stored evaluations; an absent file is an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on a read or parse failure.
    #[instrument(skip(self))]
    pub fn load_evaluations(&self) -> Result<Vec<Evaluation>, StoreError> {
        read_json_list(&self.evaluations_path())
    }

    /// Appends one evaluation.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on a read or write failure.
    #[instrument(skip(self, evaluation), fields(match_id = evaluation.match_id))]
    pub fn append_evaluation(&self, evaluation: &Evaluation) -> Result<(), StoreError> {
        let mut evaluations = self.load_evaluations()?;
        evaluations.push(evaluation.clone());
        write_json(&self.evaluations_path(), &evaluations)?;
        debug!(total = evaluations.len(), "Evaluation appended");
        Ok(())
    }

    /// Records a human evaluation against the first un-evaluated play of the
    /// given match, marking the play evaluated.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when no play of the match is awaiting review,
    /// or on a read or write failure.
    #[instrument(skip(self, scores, comment))]
    pub fn record_evaluation(
        &self,
        match_id: u32,
        scores: RubricScores,
        comment: String,
    ) -> Result<Evaluation, StoreError> {
        let mut plays = self.load_plays()?;
        let play = plays
            .iter_mut()
            .find(|p| p.match_id == match_id && !p.evaluated)
            .ok_or_else(|| {
                StoreError::new(format!("No play awaiting review for match {}", match_id))
            })?;

        play.evaluated = true;
        let evaluation = Evaluation {
            match_id,
            player: play.player,
            model: play.model.clone(),
            mv: play.mv,
            scores,
            comment,
            evaluated_at: now_stamp(),
        };

        self.save_plays(&plays)?;
        self.append_evaluation(&evaluation)?;
        info!(match_id, "Evaluation recorded");
        Ok(evaluation)
    }

    /// Merges plays from another file into the store, skipping records
    /// already present. Duplicates are keyed on (match id, move, player).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on a read, parse, or write failure.
    #[instrument(skip(self, source), fields(source = %source.as_ref().display()))]
    pub fn import_plays(&self, source: impl AsRef<Path>) -> Result<ImportSummary, StoreError> {
        let incoming: Vec<PlayRecord> = read_json_list(source.as_ref())?;
        let mut plays = self.load_plays()?;

        let mut seen: HashSet<(u32, Move, Player)> = plays
            .iter()
            .map(|p| (p.match_id, p.mv, p.player))
            .collect();

        let mut summary = ImportSummary {
            new: 0,
            duplicate: 0,
        };
        for record in incoming {
            let key = (record.match_id, record.mv, record.player);
            if !seen.insert(key) {
                summary.duplicate += 1;
                continue;
            }
            plays.push(record);
            summary.new += 1;
        }

        self.save_plays(&plays)?;
        info!(
            new = summary.new,
            duplicate = summary.duplicate,
            "Import finished"
        );
        Ok(summary)
    }

    /// Mean score per dimension across stored evaluations, rounded to two
    /// decimals. A dimension nobody has scored averages 0.0.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on a read or parse failure.
    #[instrument(skip(self))]
    pub fn score_averages(&self) -> Result<BTreeMap<Dimension, f64>, StoreError> {
        let evaluations = self.load_evaluations()?;

        let mut averages = BTreeMap::new();
        for dimension in Dimension::iter() {
            let scores: Vec<u8> = evaluations
                .iter()
                .filter_map(|e| e.scores.get(&dimension).copied())
                .collect();
            let average = if scores.is_empty() {
                0.0
            } else {
                let total: u32 = scores.iter().map(|&s| u32::from(s)).sum();
                (f64::from(total) / scores.len() as f64 * 100.0).round() / 100.0
            };
            averages.insert(dimension, average);
        }

        debug!(evaluations = evaluations.len(), "Averages computed");
        Ok(averages)
    }

    /// Writes the latest board-verification report.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on a write failure.
    #[instrument(skip(self, report))]
    pub fn write_verification(&self, report: &impl Serialize) -> Result<(), StoreError> {
        write_json(&self.verification_path(), report)
    }

    /// Appends one formatted audit line for a play.
    fn append_audit(&self, play: &PlayRecord) -> Result<(), StoreError> {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.audit_path())
            .map_err(|e| StoreError::new(format!("Failed to open audit log: {}", e)))?;
        writeln!(
            file,
            "[{}] player: {}, move: {}, reason: {}, outcome: {:?}",
            play.timestamp,
            play.player.symbol().to_uppercase(),
            play.mv,
            play.reason,
            play.outcome
        )
        .map_err(|e| StoreError::new(format!("Failed to write audit line: {}", e)))
    }
}

/// Local timestamp in the store's human-readable format.
pub fn now_stamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn read_json_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)
        .map_err(|e| StoreError::new(format!("Failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&content)
        .map_err(|e| StoreError::new(format!("Failed to parse {}: {}", path.display(), e)))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let content = serde_json::to_string_pretty(value)
        .map_err(|e| StoreError::new(format!("Failed to serialize {}: {}", path.display(), e)))?;
    fs::write(path, content)
        .map_err(|e| StoreError::new(format!("Failed to write {}: {}", path.display(), e)))
}
