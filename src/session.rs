//! Live game state and turn orchestration.

use crate::games::tictactoe::{Board, Mark, Move, Square, check_outcome};
use crate::replay::{ReplayMatcher, SuggestedMove};
use crate::rubric;
use crate::store::{PlayRecord, now_stamp};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Error from playing a replay-driven turn.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum TurnError {
    /// The suggested move targets an occupied square.
    #[display("illegal move from model for player {player}: {mv}")]
    SquareOccupied {
        /// The player whose turn it was.
        player: Mark,
        /// The rejected move.
        mv: Move,
    },
}

impl std::error::Error for TurnError {}

/// A game session: live board, player to move, turn counter, play history.
///
/// One session exists per process run; a new one would need its own matcher,
/// since sharing a scan cursor across concurrent games starves one of them.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    to_move: Mark,
    turn: u32,
    history: Vec<PlayRecord>,
}

impl GameSession {
    /// Creates a fresh session with an empty board and X to move.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating new game session");
        Self {
            board: Board::new(),
            to_move: Mark::X,
            turn: 1,
            history: Vec::new(),
        }
    }

    /// Live board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Player to move.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// 1-based turn counter.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Plays made so far in this game.
    pub fn history(&self) -> &[PlayRecord] {
        &self.history
    }

    /// Most recent play, if any.
    pub fn last_play(&self) -> Option<&PlayRecord> {
        self.history.last()
    }

    /// Clears the board and history for a new game, X to move.
    ///
    /// Whether the matcher's cursor rewinds too is the caller's decision;
    /// the dataset is shared across the games of a process run.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        info!("Restarting game session");
        self.board = Board::new();
        self.to_move = Mark::X;
        self.turn = 1;
        self.history.clear();
    }

    /// Plays one replay-driven turn.
    ///
    /// Asks the matcher for the next recorded move whose pre-move board
    /// matches the live board, applies it, scores the reason text, and
    /// records the play. Alternates the player unless the move ended the
    /// game.
    ///
    /// # Errors
    ///
    /// Returns [`TurnError::SquareOccupied`] when the suggestion targets an
    /// occupied square; the board is left untouched so the caller can report
    /// the rejected move alongside the live state.
    #[instrument(skip(self, matcher), fields(turn = self.turn, player = %self.to_move))]
    pub fn play_turn(&mut self, matcher: &mut ReplayMatcher) -> Result<PlayRecord, TurnError> {
        let SuggestedMove { mv, reason, model } = matcher.find_move(&self.board, self.to_move);

        let idx = mv.index();
        if !self.board.is_empty(idx) {
            warn!(%mv, player = %self.to_move, "Suggested move targets an occupied square");
            return Err(TurnError::SquareOccupied {
                player: self.to_move,
                mv,
            });
        }

        self.board.set(idx, Square::Occupied(self.to_move)).unwrap();
        let outcome = check_outcome(&self.board);
        let scores = rubric::score_reason(&reason);

        let record = PlayRecord {
            match_id: self.turn,
            player: self.to_move,
            mv,
            reason,
            model,
            outcome,
            board: self.board.clone(),
            scores,
            evaluated: false,
            timestamp: now_stamp(),
        };

        self.history.push(record.clone());
        self.turn += 1;
        if !outcome.is_over() {
            self.to_move = self.to_move.opponent();
        }

        info!(
            match_id = record.match_id,
            mv = %record.mv,
            outcome = ?outcome,
            "Turn played"
        );
        Ok(record)
    }

    /// Rebuilds the board from this game's history and compares it with the
    /// live board.
    #[instrument(skip(self))]
    pub fn verify_history(&self) -> VerificationReport {
        let mut reconstructed = Board::new();
        for play in &self.history {
            reconstructed
                .set(play.mv.index(), Square::Occupied(play.player))
                .unwrap();
        }

        let consistent = reconstructed == self.board;
        debug!(consistent, plays = self.history.len(), "History verified");

        VerificationReport {
            checked_at: now_stamp(),
            live_board: self.board.clone(),
            reconstructed,
            consistent,
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of replaying a game's history onto an empty board.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    /// When the check ran.
    pub checked_at: String,
    /// The live board at check time.
    pub live_board: Board,
    /// The board rebuilt from history.
    pub reconstructed: Board,
    /// Whether the two agree.
    pub consistent: bool,
}
