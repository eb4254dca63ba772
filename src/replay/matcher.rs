//! Forward-only matching of recorded moves against a live board.

use super::dataset::MoveRecord;
use crate::games::tictactoe::{
    Board, FormatError, Mark, Move, board_from_cells, move_from_value, remove_mark,
};
use serde::Serialize;
use tracing::{debug, instrument, warn};

/// Reason returned when a matched record was flagged invalid at recording time.
pub const INVALID_MOVE_REASON: &str = "invalid move reported by source model";

/// Reason returned when the scan exhausts the log without a match.
pub const FALLBACK_REASON: &str = "no remaining valid move found in dataset";

/// Model identifier attached to the fallback result.
pub const FALLBACK_MODEL: &str = "unknown_model";

/// A move suggestion produced by the matcher.
///
/// [`ReplayMatcher::find_move`] never fails; exhaustion and recorded-invalid
/// outcomes are reported through the fixed sentinel reason and model strings,
/// and callers branch on those rather than on an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestedMove {
    /// The move to apply.
    #[serde(rename = "move")]
    pub mv: Move,
    /// The recorded reason, or a sentinel.
    pub reason: String,
    /// The recorded source model, or a sentinel.
    pub model: String,
}

/// What examining a single record produced.
#[derive(Debug)]
enum EntryScan {
    /// Pre-move board equals the live board.
    Matched(SuggestedMove),
    /// Record belongs to the other player.
    WrongPlayer,
    /// Record failed to decode.
    Malformed(FormatError),
    /// Decoded fine but reconstructs a different board.
    NoMatch,
}

/// Stateful scanner over the recorded move log.
///
/// The cursor only moves forward: every record examined is consumed, whether
/// it matched, belonged to the other player, or failed to decode. A consumed
/// record is never offered again until [`ReplayMatcher::reset`] rewinds the
/// scan for a fresh playthrough.
#[derive(Debug, Clone)]
pub struct ReplayMatcher {
    records: Vec<MoveRecord>,
    cursor: usize,
}

impl ReplayMatcher {
    /// Creates a matcher over an ordered record log.
    #[instrument(skip(records), fields(count = records.len()))]
    pub fn new(records: Vec<MoveRecord>) -> Self {
        Self { records, cursor: 0 }
    }

    /// Current scan position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of records in the log.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rewinds the scan to the start of the log.
    ///
    /// Records skipped earlier for belonging to the other player become
    /// available again; the log is shared across all games in a process run
    /// unless explicitly rewound like this.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        debug!(cursor = self.cursor, "Resetting scan cursor");
        self.cursor = 0;
    }

    /// Finds and consumes the next record whose pre-move board equals
    /// `live_board`, restricted to `player`.
    ///
    /// Always returns a suggestion. When the log runs out the fallback is the
    /// center cell with [`FALLBACK_REASON`] and [`FALLBACK_MODEL`], and every
    /// later call returns the same fallback immediately.
    #[instrument(skip(self, live_board), fields(cursor = self.cursor))]
    pub fn find_move(&mut self, live_board: &Board, player: Mark) -> SuggestedMove {
        while self.cursor < self.records.len() {
            let index = self.cursor;
            self.cursor += 1;

            match examine(&self.records[index], live_board, player) {
                EntryScan::Matched(suggestion) => {
                    debug!(
                        index,
                        mv = %suggestion.mv,
                        model = %suggestion.model,
                        "Matched recorded move"
                    );
                    return suggestion;
                }
                EntryScan::WrongPlayer | EntryScan::NoMatch => {}
                EntryScan::Malformed(error) => {
                    warn!(index, %error, "Skipping malformed dataset row");
                }
            }
        }

        debug!("Log exhausted, returning fallback move");
        SuggestedMove {
            mv: Move::center(),
            reason: FALLBACK_REASON.to_string(),
            model: FALLBACK_MODEL.to_string(),
        }
    }
}

/// Examines one record against the live board.
///
/// Decoding happens here, per record, so a malformed row is classified and
/// skipped without unwinding past the scan loop.
fn examine(record: &MoveRecord, live_board: &Board, player: Mark) -> EntryScan {
    if record.player != player.symbol() {
        return EntryScan::WrongPlayer;
    }

    let board_after = match board_from_cells(&record.board) {
        Ok(board) => board,
        Err(error) => return EntryScan::Malformed(error),
    };
    let mv = match move_from_value(&record.mv) {
        Ok(mv) => mv,
        Err(error) => return EntryScan::Malformed(error),
    };

    let pre_move = remove_mark(&board_after, mv, player);
    if &pre_move != live_board {
        return EntryScan::NoMatch;
    }

    let reason = if record.valid == 1 {
        record.reason.clone()
    } else {
        INVALID_MOVE_REASON.to_string()
    };

    EntryScan::Matched(SuggestedMove {
        mv,
        reason,
        model: record.model.clone(),
    })
}
