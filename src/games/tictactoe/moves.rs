//! First-class move type for replayed tic-tac-toe turns.
//!
//! Moves are domain events, not side effects. A `Move` is valid by
//! construction: its coordinates are checked once at the decoding boundary
//! and never again.

use super::codec::{self, FormatError};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wire tag for the move encoding.
pub const MOVE_TAG: &str = "mark";

/// A move: marking one board cell.
///
/// Row and column are 1-indexed, matching the external `["mark", row, col]`
/// encoding used by the recorded games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    row: u8,
    col: u8,
}

impl Move {
    /// Creates a move from 1-indexed coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::CoordinateOutOfRange`] when either coordinate
    /// falls outside 1..=3.
    pub fn new(row: u8, col: u8) -> Result<Self, FormatError> {
        if !(1..=3).contains(&row) || !(1..=3).contains(&col) {
            return Err(FormatError::CoordinateOutOfRange {
                row: i64::from(row),
                col: i64::from(col),
            });
        }
        Ok(Self { row, col })
    }

    /// The deterministic fallback target: the center cell.
    pub fn center() -> Self {
        Self { row: 2, col: 2 }
    }

    /// 1-indexed row.
    pub fn row(&self) -> u8 {
        self.row
    }

    /// 1-indexed column.
    pub fn col(&self) -> u8 {
        self.col
    }

    /// Row-major board index (0-8).
    pub fn index(&self) -> usize {
        (usize::from(self.row) - 1) * 3 + (usize::from(self.col) - 1)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mark({}, {})", self.row, self.col)
    }
}

impl Serialize for Move {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(3))?;
        seq.serialize_element(MOVE_TAG)?;
        seq.serialize_element(&self.row)?;
        seq.serialize_element(&self.col)?;
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Move {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        codec::move_from_value(&value).map_err(serde::de::Error::custom)
    }
}
