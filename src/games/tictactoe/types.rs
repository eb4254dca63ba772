//! Core domain types for tic-tac-toe.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Dataset symbol for this player.
    pub fn symbol(self) -> &'static str {
        match self {
            Player::X => "x",
            Player::O => "o",
        }
    }

    /// Parses a dataset symbol.
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "x" => Some(Player::X),
            "o" => Some(Player::O),
            _ => None,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Dataset symbol for this square ("b" marks a blank).
    pub fn symbol(self) -> &'static str {
        match self {
            Square::Empty => "b",
            Square::Occupied(player) => player.symbol(),
        }
    }

    /// Parses a dataset symbol.
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "b" => Some(Square::Empty),
            _ => Player::from_symbol(s).map(Square::Occupied),
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// Boards are compared structurally: two boards are equal iff all nine
/// squares match. The replay scan relies on this as its matching primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Creates a board from nine squares in row-major order.
    pub fn from_squares(squares: [Square; 9]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given position (0-8).
    pub fn get(&self, pos: usize) -> Option<Square> {
        self.squares.get(pos).copied()
    }

    /// Sets the square at the given position.
    pub fn set(&mut self, pos: usize, square: Square) -> Result<(), &'static str> {
        if pos >= 9 {
            return Err("Position out of bounds");
        }
        self.squares[pos] = square;
        Ok(())
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: usize) -> bool {
        matches!(self.get(pos), Some(Square::Empty))
    }

    /// Checks if the board is full.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Formats the board as a human-readable grid.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let symbol = match self.squares[row * 3 + col] {
                    Square::Empty => ".",
                    Square::Occupied(Player::X) => "X",
                    Square::Occupied(Player::O) => "O",
                };
                result.push_str(symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

// Wire form is the nested symbol grid the recorded games used: [["b","x","o"], ...].
impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut rows = [[""; 3]; 3];
        for row in 0..3 {
            for col in 0..3 {
                rows[row][col] = self.squares[row * 3 + col].symbol();
            }
        }
        rows.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = <[[String; 3]; 3]>::deserialize(deserializer)?;
        let mut squares = [Square::Empty; 9];
        for (row, cells) in rows.iter().enumerate() {
            for (col, symbol) in cells.iter().enumerate() {
                squares[row * 3 + col] = Square::from_symbol(symbol)
                    .ok_or_else(|| D::Error::custom(format!("unknown cell symbol {symbol:?}")))?;
            }
        }
        Ok(Board::from_squares(squares))
    }
}

/// Terminal status of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Player),
    /// Game ended in a draw.
    Draw,
}

impl Outcome {
    /// Returns the winner, if any.
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Won(player) => Some(player),
            _ => None,
        }
    }

    /// Whether the game is over.
    pub fn is_over(self) -> bool {
        self != Outcome::InProgress
    }
}
