//! Terminal-outcome detection.

use super::super::types::{Board, Outcome, Square};
use tracing::instrument;

/// Winning combinations: 3 rows, 3 columns, 2 diagonals.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Determines the outcome of a board.
///
/// The first line holding three identical marks decides the winner. A full
/// board with no winning line is a draw; anything else is still in progress.
#[instrument(skip(board))]
pub fn check_outcome(board: &Board) -> Outcome {
    for [a, b, c] in LINES {
        if let Some(Square::Occupied(player)) = board.get(a) {
            if board.get(b) == Some(Square::Occupied(player))
                && board.get(c) == Some(Square::Occupied(player))
            {
                return Outcome::Won(player);
            }
        }
    }

    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::types::Player;

    fn occupied(player: Player) -> Square {
        Square::Occupied(player)
    }

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(check_outcome(&Board::new()), Outcome::InProgress);
    }

    #[test]
    fn test_winner_top_row() {
        let mut board = Board::new();
        for pos in [0, 1, 2] {
            board.set(pos, occupied(Player::X)).unwrap();
        }
        assert_eq!(check_outcome(&board), Outcome::Won(Player::X));
    }

    #[test]
    fn test_winner_column() {
        let mut board = Board::new();
        for pos in [1, 4, 7] {
            board.set(pos, occupied(Player::O)).unwrap();
        }
        assert_eq!(check_outcome(&board), Outcome::Won(Player::O));
    }

    #[test]
    fn test_winner_diagonal() {
        let mut board = Board::new();
        for pos in [2, 4, 6] {
            board.set(pos, occupied(Player::O)).unwrap();
        }
        assert_eq!(check_outcome(&board), Outcome::Won(Player::O));
    }

    #[test]
    fn test_draw_on_full_board() {
        // X O X / O X X / O X O - full, no line
        let mut board = Board::new();
        for (pos, player) in [
            (0, Player::X),
            (1, Player::O),
            (2, Player::X),
            (3, Player::O),
            (4, Player::X),
            (5, Player::X),
            (6, Player::O),
            (7, Player::X),
            (8, Player::O),
        ] {
            board.set(pos, occupied(player)).unwrap();
        }
        assert_eq!(check_outcome(&board), Outcome::Draw);
    }

    #[test]
    fn test_partial_board_in_progress() {
        let mut board = Board::new();
        board.set(4, occupied(Player::X)).unwrap();
        board.set(0, occupied(Player::O)).unwrap();
        assert_eq!(check_outcome(&board), Outcome::InProgress);
    }
}
