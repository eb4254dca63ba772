//! HTTP API over one shared replay session.
//!
//! The route set mirrors the game's lifecycle: inspect state, play a
//! replay-driven turn, restart or move to the next game, review and evaluate
//! stored plays. Every response is JSON; a rejected turn is an ordinary
//! response body carrying the untouched board, not an HTTP error.

use crate::config::ServerConfig;
use crate::games::tictactoe::Board;
use crate::replay::{ReplayMatcher, load_dataset};
use crate::rubric::{Dimension, RubricScores};
use crate::session::{GameSession, VerificationReport};
use crate::store::{PlayRecord, PlayStore};
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use strum::IntoEnumIterator;
use tokio::net::TcpListener;
use tracing::{info, instrument, warn};

/// Shared state behind every route.
#[derive(Debug)]
pub struct AppState {
    /// The single live game.
    session: Mutex<GameSession>,
    /// The shared dataset scan.
    matcher: Mutex<ReplayMatcher>,
    /// Persistence for plays and evaluations.
    store: PlayStore,
}

impl AppState {
    /// Creates the shared state over a loaded matcher and an open store.
    pub fn new(matcher: ReplayMatcher, store: PlayStore) -> Self {
        Self {
            session: Mutex::new(GameSession::new()),
            matcher: Mutex::new(matcher),
            store,
        }
    }
}

/// Response of the play-turn route.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum TurnResponse {
    /// The turn was played and recorded.
    Played(PlayRecord),
    /// The suggested move was rejected; the board is unchanged.
    Rejected {
        /// Why the move was rejected.
        error: String,
        /// The untouched live board.
        board: Board,
    },
}

/// Body of the evaluation-recording route.
#[derive(Debug, Deserialize)]
struct EvaluationRequest {
    /// Turn number of the play under review.
    match_id: u32,
    /// Per-dimension scores assigned by the reviewer.
    scores: RubricScores,
    /// Free-text comment from the reviewer.
    #[serde(default)]
    comment: String,
}

/// One rubric dimension with its reference text.
#[derive(Debug, Serialize)]
struct RubricEntry {
    dimension: &'static str,
    summary: &'static str,
    levels: [&'static str; 3],
}

/// Builds the router over the shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/state", get(game_state))
        .route("/turn", post(play_turn))
        .route("/restart", post(restart))
        .route("/match/next", post(next_match))
        .route("/match/counter", get(match_counter))
        .route("/last_play", get(last_play))
        .route("/verify", get(verify))
        .route("/rubric", get(rubric_reference))
        .route("/evaluations", get(list_evaluations).post(record_evaluation))
        .route("/evaluations/averages", get(score_averages))
        .with_state(state)
}

/// Loads the dataset and store, then serves the API.
///
/// # Errors
///
/// Fails when the dataset cannot be loaded, the store cannot be opened, or
/// the listen address cannot be bound.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let records = load_dataset(config.dataset())?;
    let store = PlayStore::new(config.data_dir())?;
    let state = Arc::new(AppState::new(ReplayMatcher::new(records), store));

    let addr = format!("{}:{}", config.host(), config.port());
    info!(%addr, "Replay server listening");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Live board and player to move.
#[instrument(skip(state))]
async fn game_state(State(state): State<Arc<AppState>>) -> Json<Value> {
    let session = state.session.lock().unwrap();
    Json(json!({
        "board": session.board(),
        "to_move": session.to_move(),
        "turn": session.turn(),
    }))
}

/// Plays one replay-driven turn and persists the result.
#[instrument(skip(state))]
async fn play_turn(State(state): State<Arc<AppState>>) -> Json<TurnResponse> {
    let mut session = state.session.lock().unwrap();
    let mut matcher = state.matcher.lock().unwrap();

    let record = match session.play_turn(&mut matcher) {
        Ok(record) => record,
        Err(error) => {
            return Json(TurnResponse::Rejected {
                error: error.to_string(),
                board: session.board().clone(),
            });
        }
    };

    if let Err(error) = state.store.append_play(&record) {
        warn!(%error, "Failed to persist play");
    }

    Json(TurnResponse::Played(record))
}

/// Restarts the game and rewinds the dataset scan.
#[instrument(skip(state))]
async fn restart(State(state): State<Arc<AppState>>) -> Json<Value> {
    let mut session = state.session.lock().unwrap();
    let mut matcher = state.matcher.lock().unwrap();
    session.restart();
    matcher.reset();
    Json(json!({ "status": "restarted" }))
}

/// Starts the next game; the dataset scan keeps its position.
#[instrument(skip(state))]
async fn next_match(State(state): State<Arc<AppState>>) -> Json<Value> {
    let mut session = state.session.lock().unwrap();
    session.restart();
    Json(json!({ "ok": true, "message": "new game ready, scan cursor kept" }))
}

/// Current scan position within the dataset.
#[instrument(skip(state))]
async fn match_counter(State(state): State<Arc<AppState>>) -> Json<Value> {
    let matcher = state.matcher.lock().unwrap();
    Json(json!({ "cursor": matcher.cursor(), "total": matcher.len() }))
}

/// Most recent persisted play.
#[instrument(skip(state))]
async fn last_play(State(state): State<Arc<AppState>>) -> Json<Value> {
    match state.store.load_plays() {
        Ok(plays) => match plays.last() {
            Some(play) => Json(json!({ "play": play })),
            None => Json(json!({ "error": "no plays recorded" })),
        },
        Err(error) => Json(json!({ "error": error.to_string() })),
    }
}

/// Rebuilds the board from history and reports whether it matches.
#[instrument(skip(state))]
async fn verify(State(state): State<Arc<AppState>>) -> Json<VerificationReport> {
    let session = state.session.lock().unwrap();
    let report = session.verify_history();

    if let Err(error) = state.store.write_verification(&report) {
        warn!(%error, "Failed to persist verification report");
    }

    Json(report)
}

/// The full rubric reference.
#[instrument]
async fn rubric_reference() -> Json<Vec<RubricEntry>> {
    let entries = Dimension::iter()
        .map(|dimension| RubricEntry {
            dimension: dimension.label(),
            summary: dimension.summary(),
            levels: dimension.levels(),
        })
        .collect();
    Json(entries)
}

/// All stored evaluations.
#[instrument(skip(state))]
async fn list_evaluations(State(state): State<Arc<AppState>>) -> Json<Value> {
    match state.store.load_evaluations() {
        Ok(evaluations) => Json(json!({ "evaluations": evaluations })),
        Err(error) => Json(json!({ "error": error.to_string() })),
    }
}

/// Records a human evaluation for a pending play.
#[instrument(skip(state, request), fields(match_id = request.match_id))]
async fn record_evaluation(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EvaluationRequest>,
) -> Json<Value> {
    match state
        .store
        .record_evaluation(request.match_id, request.scores, request.comment)
    {
        Ok(evaluation) => Json(json!({ "evaluation": evaluation })),
        Err(error) => Json(json!({ "error": error.to_string() })),
    }
}

/// Per-dimension score averages across stored evaluations.
#[instrument(skip(state))]
async fn score_averages(State(state): State<Arc<AppState>>) -> Json<Value> {
    match state.store.score_averages() {
        Ok(averages) => Json(json!({ "averages": averages })),
        Err(error) => Json(json!({ "error": error.to_string() })),
    }
}
