//! HTTP API for the game session
//!
//! One session per process, shared behind a mutex so commands execute
//! strictly one at a time. Every command answers with the same full
//! snapshot payload: rendered board, status text, chart when available,
//! move history and elapsed time. Rejected moves are ordinary responses
//! with an explanatory status, never HTTP errors.

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    response::Html,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::info;

use evalboard_render::{render_board, render_chart};
use evalboard_session::{
    ChessEngine, GameSession, GameStatus, MoveRecord, MoveReport, SessionError,
};

use crate::page;

/// Shared application state: the single game session
pub struct AppState<E: ChessEngine> {
    session: Arc<Mutex<GameSession<E>>>,
}

impl<E: ChessEngine> AppState<E> {
    pub fn new(session: GameSession<E>) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// Reclaim the session once no handler can touch it anymore
    ///
    /// Returns `None` while other clones of the state are still alive.
    pub fn into_session(self) -> Option<GameSession<E>> {
        Arc::try_unwrap(self.session).ok().map(Mutex::into_inner)
    }
}

impl<E: ChessEngine> Clone for AppState<E> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
        }
    }
}

#[derive(Deserialize)]
pub struct MoveRequest {
    pub san: String,
}

/// The full snapshot every command returns
#[derive(Serialize)]
pub struct CommandResponse {
    pub board_svg: String,
    pub status: String,
    pub chart_svg: Option<String>,
    pub history: Vec<MoveRecord>,
    pub elapsed_seconds: f64,
}

pub fn router<E: ChessEngine + 'static>(state: AppState<E>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/move", post(submit_move::<E>))
        .route("/api/undo", post(undo::<E>))
        .route("/api/reset", post(reset::<E>))
        .route("/api/state", get(current_state::<E>))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(page::INDEX)
}

async fn submit_move<E: ChessEngine>(
    State(state): State<AppState<E>>,
    Json(request): Json<MoveRequest>,
) -> Json<CommandResponse> {
    let mut session = state.session.lock().await;
    let status = match session.apply_player_move(&request.san).await {
        Ok(report) => describe_report(&report),
        Err(err) => describe_error(&err),
    };
    Json(snapshot(&session, status))
}

async fn undo<E: ChessEngine>(State(state): State<AppState<E>>) -> Json<CommandResponse> {
    let mut session = state.session.lock().await;
    let status = if session.history().is_empty() {
        "Nothing to undo".to_string()
    } else {
        session.undo();
        "Move undone".to_string()
    };
    Json(snapshot(&session, status))
}

async fn reset<E: ChessEngine>(State(state): State<AppState<E>>) -> Json<CommandResponse> {
    let mut session = state.session.lock().await;
    session.reset().await;
    info!("board reset");
    Json(snapshot(&session, "Board reset".to_string()))
}

async fn current_state<E: ChessEngine>(State(state): State<AppState<E>>) -> Json<CommandResponse> {
    let session = state.session.lock().await;
    let status = outcome_text(session.status()).unwrap_or_else(|| {
        format!(
            "{} to move",
            if session.side_to_move().is_white() {
                "White"
            } else {
                "Black"
            }
        )
    });
    Json(snapshot(&session, status))
}

/// Assemble the snapshot payload from the session's read-only views
fn snapshot<E: ChessEngine>(session: &GameSession<E>, status: String) -> CommandResponse {
    CommandResponse {
        board_svg: render_board(&session.board()),
        status,
        chart_svg: render_chart(session.white_series(), session.black_series()),
        history: session.history().to_vec(),
        elapsed_seconds: session.elapsed().as_secs_f64(),
    }
}

fn describe_report(report: &MoveReport) -> String {
    let mut status = match &report.engine_san {
        Some(reply) => format!("Move successful, engine replied {reply}"),
        None => format!("Move successful: {}", report.player_san),
    };
    if let Some(outcome) = outcome_text(report.status) {
        status.push_str(". ");
        status.push_str(&outcome);
    }
    status
}

fn describe_error(err: &SessionError) -> String {
    match err {
        SessionError::EmptyMove => "No move entered".to_string(),
        SessionError::IllegalMove { input, reason } => {
            format!("Invalid move {input:?}: {reason}")
        }
        SessionError::EngineUnavailable(source) => {
            format!("Engine unavailable ({source}); your move stands, try again or undo")
        }
    }
}

fn outcome_text(status: GameStatus) -> Option<String> {
    match status {
        GameStatus::Ongoing => None,
        GameStatus::Checkmate { winner } => Some(format!(
            "Checkmate, {} wins",
            if winner.is_white() { "White" } else { "Black" }
        )),
        GameStatus::Stalemate => Some("Stalemate".to_string()),
        GameStatus::InsufficientMaterial => Some("Draw by insufficient material".to_string()),
    }
}
