//! The seven-dimension evaluation rubric.
//!
//! Every play is scored twice: automatically at play time from its reason
//! text, and later by a human reviewer. Both produce the same score shape,
//! one level (1-3) per dimension.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use tracing::instrument;

/// Scores by dimension. A `BTreeMap` keeps JSON output stably ordered.
pub type RubricScores = BTreeMap<Dimension, u8>;

/// A dimension of the evaluation rubric.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Does the move respect the basic rules of the game?
    RuleComprehension,
    /// Is the move legal and inside the board?
    MoveLegality,
    /// Does the explanation show strategic intent?
    StrategicReasoning,
    /// Is the explanation grounded in the actual board?
    Factuality,
    /// Is the explanation internally coherent?
    ExplanatoryCoherence,
    /// Is the language clear and correct?
    LinguisticClarity,
    /// Does the move react to the opponent's previous play?
    Adaptability,
}

impl Dimension {
    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::RuleComprehension => "Rule Comprehension",
            Dimension::MoveLegality => "Move Legality",
            Dimension::StrategicReasoning => "Strategic Reasoning",
            Dimension::Factuality => "Factuality",
            Dimension::ExplanatoryCoherence => "Explanatory Coherence",
            Dimension::LinguisticClarity => "Linguistic Clarity",
            Dimension::Adaptability => "Adaptability",
        }
    }

    /// One-line summary for the rubric listing.
    pub fn summary(&self) -> &'static str {
        match self {
            Dimension::RuleComprehension => "Whether the play follows the basic rules.",
            Dimension::MoveLegality => "Whether the move is legal on the current board.",
            Dimension::StrategicReasoning => "The strategic intent behind the move.",
            Dimension::Factuality => "Whether the explanation matches the real board.",
            Dimension::ExplanatoryCoherence => "Clarity and logic of the explanation.",
            Dimension::LinguisticClarity => "Grammar and precision of the language.",
            Dimension::Adaptability => "Reaction to the opponent's previous plays.",
        }
    }

    /// Reference text for score levels 1 to 3.
    pub fn levels(&self) -> [&'static str; 3] {
        match self {
            Dimension::RuleComprehension => [
                "Breaks basic rules: occupied square or outside the board.",
                "Follows the basic rules but misses less obvious situations.",
                "Always legal moves, respects every rule of the turn.",
            ],
            Dimension::MoveLegality => [
                "Invalid or illegal move (out of bounds).",
                "Valid move, without deeper analysis.",
                "Valid move chosen after a full read of the board.",
            ],
            Dimension::StrategicReasoning => [
                "Action without logic, random or counterproductive.",
                "Simple strategic intent (block or advance) without anticipation.",
                "Clear, anticipatory justification that maximizes winning chances.",
            ],
            Dimension::Factuality => [
                "Explanation incorrect or unrelated to the real board.",
                "Mostly correct justification with minor inaccuracies.",
                "Precise explanation grounded in concrete board facts.",
            ],
            Dimension::ExplanatoryCoherence => [
                "Confusing or contradictory explanation.",
                "Clear but superficial explanation.",
                "Logical, complete explanation aligned with the move.",
            ],
            Dimension::LinguisticClarity => [
                "Unclear language or serious errors.",
                "Clear language with small errors.",
                "Precise, grammatical, easy-to-follow language.",
            ],
            Dimension::Adaptability => [
                "Ignores the opponent's previous play.",
                "Adapts in a basic or delayed way.",
                "Adapts quickly and adjusts strategy effectively.",
            ],
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Scores a play's reason text against every dimension.
///
/// Keyword heuristics carried over from the recorded-game evaluator: a
/// dimension scores 3 when its signal appears in the reason, 2 otherwise.
/// Human review can overwrite these later.
#[instrument(skip(reason))]
pub fn score_reason(reason: &str) -> RubricScores {
    let reason = reason.to_lowercase();
    Dimension::iter()
        .map(|dimension| (dimension, auto_score(dimension, &reason)))
        .collect()
}

fn auto_score(dimension: Dimension, reason: &str) -> u8 {
    let hit = match dimension {
        Dimension::RuleComprehension => reason.contains("legal") || reason.contains("valid"),
        Dimension::MoveLegality => reason.contains("valid"),
        Dimension::StrategicReasoning => reason.contains("block") || reason.contains("win"),
        Dimension::Factuality => reason.contains("board") || reason.contains("position"),
        Dimension::ExplanatoryCoherence => reason.contains("because") || reason.contains("since"),
        Dimension::LinguisticClarity => reason.len() > 15,
        Dimension::Adaptability => reason.contains("response") || reason.contains("adjust"),
    };
    if hit { 3 } else { 2 }
}
