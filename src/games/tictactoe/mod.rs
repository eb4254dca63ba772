mod codec;
mod moves;
mod rules;
mod types;

pub use codec::{CELL_TAG, FormatError, board_from_cells, move_from_value};
pub use moves::{MOVE_TAG, Move};
pub use rules::{check_outcome, remove_mark};
pub use types::{Board, Outcome, Player, Square};

/// Alias for clarity in session and replay code.
pub type Mark = Player;
