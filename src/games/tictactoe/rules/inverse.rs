//! Inverse move application for pre-move board reconstruction.

use super::super::moves::Move;
use super::super::types::{Board, Player, Square};
use tracing::instrument;

/// Returns a new board with the move's square cleared.
///
/// The square is cleared only when it currently holds `player`'s mark.
/// Anything else is left untouched: recorded rows are sometimes
/// self-inconsistent, and the replay scan treats such a reconstruction as an
/// ordinary non-match instead of rejecting the row.
#[instrument(skip(board))]
pub fn remove_mark(board: &Board, mv: Move, player: Player) -> Board {
    let mut squares = *board.squares();
    let idx = mv.index();
    if squares[idx] == Square::Occupied(player) {
        squares[idx] = Square::Empty;
    }
    Board::from_squares(squares)
}
