//! Replay of recorded games: the dataset log and the matching scan.

mod dataset;
mod matcher;

pub use dataset::{DatasetError, MoveRecord, load_dataset};
pub use matcher::{
    FALLBACK_MODEL, FALLBACK_REASON, INVALID_MOVE_REASON, ReplayMatcher, SuggestedMove,
};
