//! Decoding for the dataset's tagged board and move encodings.
//!
//! Dataset rows store the post-move board as a sparse list of
//! `["cell", row, col, symbol]` items and the move as `["mark", row, col]`.
//! Decoding failures are ordinary values here; the replay scan catches them
//! and skips the offending row.

use super::moves::{MOVE_TAG, Move};
use super::types::{Board, Square};
use serde_json::Value;

/// Wire tag for a sparse cell item.
pub const CELL_TAG: &str = "cell";

/// Malformed board or move encoding in a dataset row.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum FormatError {
    /// The encoding is not a list.
    #[display("expected a list")]
    NotAList,

    /// A tagged item carries the wrong tag.
    #[display("unexpected tag {found:?}, expected {expected:?}")]
    UnexpectedTag {
        /// The tag the encoding requires.
        expected: &'static str,
        /// The tag actually found.
        found: String,
    },

    /// A coordinate is missing or not an integer.
    #[display("missing or non-integer coordinate")]
    BadCoordinate,

    /// A coordinate falls outside the board.
    #[display("coordinate out of range: row {row}, col {col}")]
    CoordinateOutOfRange {
        /// 1-indexed row as recorded.
        row: i64,
        /// 1-indexed column as recorded.
        col: i64,
    },

    /// A cell item has no symbol element.
    #[display("cell item has no symbol")]
    MissingSymbol,

    /// A cell symbol is not one of "b", "x", "o".
    #[display("unknown cell symbol {_0:?}")]
    UnknownSymbol(String),
}

impl std::error::Error for FormatError {}

/// Checks the tag and extracts the 1-indexed coordinates of a tagged item.
fn tagged_coords(parts: &[Value], expected: &'static str) -> Result<(u8, u8), FormatError> {
    let found = parts.first().and_then(Value::as_str).unwrap_or_default();
    if found != expected {
        return Err(FormatError::UnexpectedTag {
            expected,
            found: found.to_string(),
        });
    }
    let row = parts
        .get(1)
        .and_then(Value::as_i64)
        .ok_or(FormatError::BadCoordinate)?;
    let col = parts
        .get(2)
        .and_then(Value::as_i64)
        .ok_or(FormatError::BadCoordinate)?;
    if !(1..=3).contains(&row) || !(1..=3).contains(&col) {
        return Err(FormatError::CoordinateOutOfRange { row, col });
    }
    Ok((row as u8, col as u8))
}

/// Builds a board from a sparse cell list, defaulting unlisted squares to
/// empty.
///
/// # Errors
///
/// Returns a [`FormatError`] when the value is not a list, an item is not
/// tagged `"cell"`, a coordinate is missing or out of range, or a symbol is
/// unknown.
pub fn board_from_cells(cells: &Value) -> Result<Board, FormatError> {
    let items = cells.as_array().ok_or(FormatError::NotAList)?;
    let mut squares = [Square::Empty; 9];
    for item in items {
        let parts = item.as_array().ok_or(FormatError::NotAList)?;
        let (row, col) = tagged_coords(parts, CELL_TAG)?;
        let symbol = parts
            .get(3)
            .and_then(Value::as_str)
            .ok_or(FormatError::MissingSymbol)?;
        let square = Square::from_symbol(symbol)
            .ok_or_else(|| FormatError::UnknownSymbol(symbol.to_string()))?;
        squares[(usize::from(row) - 1) * 3 + (usize::from(col) - 1)] = square;
    }
    Ok(Board::from_squares(squares))
}

/// Decodes a `["mark", row, col]` move value.
///
/// # Errors
///
/// Returns a [`FormatError`] when the value is not a list, the tag is not
/// `"mark"`, or a coordinate is missing or out of range.
pub fn move_from_value(value: &Value) -> Result<Move, FormatError> {
    let parts = value.as_array().ok_or(FormatError::NotAList)?;
    let (row, col) = tagged_coords(parts, MOVE_TAG)?;
    Move::new(row, col)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::types::Player;
    use serde_json::json;

    #[test]
    fn test_board_from_sparse_cells() {
        let board = board_from_cells(&json!([["cell", 1, 1, "x"], ["cell", 3, 3, "o"]])).unwrap();
        assert_eq!(board.get(0), Some(Square::Occupied(Player::X)));
        assert_eq!(board.get(8), Some(Square::Occupied(Player::O)));
        assert!(board.is_empty(4));
    }

    #[test]
    fn test_board_from_empty_list_is_empty_board() {
        let board = board_from_cells(&json!([])).unwrap();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_board_rejects_wrong_tag() {
        let err = board_from_cells(&json!([["piece", 1, 1, "x"]])).unwrap_err();
        assert!(matches!(err, FormatError::UnexpectedTag { .. }));
    }

    #[test]
    fn test_board_rejects_out_of_range_cell() {
        let err = board_from_cells(&json!([["cell", 4, 1, "x"]])).unwrap_err();
        assert!(matches!(err, FormatError::CoordinateOutOfRange { .. }));
    }

    #[test]
    fn test_board_rejects_unknown_symbol() {
        let err = board_from_cells(&json!([["cell", 1, 1, "z"]])).unwrap_err();
        assert_eq!(err, FormatError::UnknownSymbol("z".to_string()));
    }

    #[test]
    fn test_move_from_value() {
        let mv = move_from_value(&json!(["mark", 2, 3])).unwrap();
        assert_eq!((mv.row(), mv.col()), (2, 3));
        assert_eq!(mv.index(), 5);
    }

    #[test]
    fn test_move_rejects_out_of_range() {
        let err = move_from_value(&json!(["mark", 0, 9])).unwrap_err();
        assert!(matches!(err, FormatError::CoordinateOutOfRange { .. }));
    }

    #[test]
    fn test_move_rejects_non_list() {
        assert_eq!(move_from_value(&json!("mark")), Err(FormatError::NotAList));
    }
}
