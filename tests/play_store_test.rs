//! Tests for the JSON-file play store.

use replay_games::{
    Board, Dimension, Evaluation, Move, Outcome, PlayRecord, PlayStore, Player, RubricScores,
    score_reason,
};
use strum::IntoEnumIterator;

fn make_play(match_id: u32, player: Player, row: u8, col: u8, reason: &str) -> PlayRecord {
    let mv = Move::new(row, col).unwrap();
    let mut board = Board::new();
    board
        .set(mv.index(), replay_games::Square::Occupied(player))
        .unwrap();

    PlayRecord {
        match_id,
        player,
        mv,
        reason: reason.to_string(),
        model: "m1".to_string(),
        outcome: Outcome::InProgress,
        board,
        scores: score_reason(reason),
        evaluated: false,
        timestamp: "2026-01-01 00:00:00".to_string(),
    }
}

fn uniform_scores(level: u8) -> RubricScores {
    Dimension::iter().map(|d| (d, level)).collect()
}

#[test]
fn test_fresh_store_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = PlayStore::new(dir.path()).unwrap();

    assert!(store.load_plays().unwrap().is_empty());
    assert!(store.load_evaluations().unwrap().is_empty());
    assert!(store.score_averages().unwrap().values().all(|&v| v == 0.0));
}

#[test]
fn test_append_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = PlayStore::new(dir.path()).unwrap();

    store
        .append_play(&make_play(1, Player::X, 1, 1, "corner opening"))
        .unwrap();
    store
        .append_play(&make_play(2, Player::O, 2, 2, "valid center block"))
        .unwrap();

    let plays = store.load_plays().unwrap();
    assert_eq!(plays.len(), 2);
    assert_eq!(plays[0].reason, "corner opening");
    assert_eq!(plays[1].player, Player::O);
    assert_eq!(plays[1].scores.len(), 7);
}

#[test]
fn test_append_writes_an_audit_line() {
    let dir = tempfile::tempdir().unwrap();
    let store = PlayStore::new(dir.path()).unwrap();

    store
        .append_play(&make_play(1, Player::X, 1, 1, "corner opening"))
        .unwrap();

    let audit = std::fs::read_to_string(dir.path().join("history.log")).unwrap();
    assert_eq!(audit.lines().count(), 1);
    assert!(audit.contains("player: X"));
    assert!(audit.contains("corner opening"));
}

#[test]
fn test_record_evaluation_marks_the_play() {
    let dir = tempfile::tempdir().unwrap();
    let store = PlayStore::new(dir.path()).unwrap();
    store
        .append_play(&make_play(1, Player::X, 1, 1, "corner opening"))
        .unwrap();

    let evaluation = store
        .record_evaluation(1, uniform_scores(3), "solid opening".to_string())
        .unwrap();
    assert_eq!(evaluation.match_id, 1);
    assert_eq!(evaluation.comment, "solid opening");

    let plays = store.load_plays().unwrap();
    assert!(plays[0].evaluated);

    let evaluations = store.load_evaluations().unwrap();
    assert_eq!(evaluations.len(), 1);
    assert_eq!(evaluations[0].scores, uniform_scores(3));
}

#[test]
fn test_record_evaluation_requires_a_pending_play() {
    let dir = tempfile::tempdir().unwrap();
    let store = PlayStore::new(dir.path()).unwrap();
    store
        .append_play(&make_play(1, Player::X, 1, 1, "corner opening"))
        .unwrap();

    store
        .record_evaluation(1, uniform_scores(2), String::new())
        .unwrap();

    // The only play of match 1 is reviewed; a second review has no target.
    let error = store
        .record_evaluation(1, uniform_scores(2), String::new())
        .unwrap_err();
    assert!(error.to_string().contains("No play awaiting review"));
}

#[test]
fn test_import_skips_records_already_present() {
    let dir = tempfile::tempdir().unwrap();
    let store = PlayStore::new(dir.path()).unwrap();
    let existing = make_play(1, Player::X, 1, 1, "corner opening");
    store.append_play(&existing).unwrap();

    let incoming = vec![
        existing.clone(),
        make_play(2, Player::O, 2, 2, "center reply"),
    ];
    let source = dir.path().join("incoming.json");
    std::fs::write(&source, serde_json::to_string_pretty(&incoming).unwrap()).unwrap();

    let summary = store.import_plays(&source).unwrap();
    assert_eq!(summary.new, 1);
    assert_eq!(summary.duplicate, 1);
    assert_eq!(store.load_plays().unwrap().len(), 2);
}

#[test]
fn test_score_averages_over_evaluations() {
    let dir = tempfile::tempdir().unwrap();
    let store = PlayStore::new(dir.path()).unwrap();

    for (match_id, level) in [(1, 3), (2, 2)] {
        store
            .append_evaluation(&Evaluation {
                match_id,
                player: Player::X,
                model: "m1".to_string(),
                mv: Move::new(1, 1).unwrap(),
                scores: uniform_scores(level),
                comment: String::new(),
                evaluated_at: "2026-01-01 00:00:00".to_string(),
            })
            .unwrap();
    }

    let averages = store.score_averages().unwrap();
    assert_eq!(averages.len(), 7);
    assert!(averages.values().all(|&v| v == 2.5));
}
