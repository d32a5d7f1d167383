//! Tournament bracket API handlers.
//!
//! This module provides HTTP REST endpoints for bracket operations:
//! - Generating a bracket from a participant list (replacing any previous one)
//! - Reading the bracket with its progress summary
//! - Reading the display projection, as JSON or plain text
//! - Reporting match results
//! - Resetting a bracket and removing a tournament
//!
//! # Examples
//!
//! Generate a bracket:
//! ```bash
//! curl -X POST http://localhost:6969/api/v1/tournaments/spring-cup/bracket \
//!   -H "Content-Type: application/json" \
//!   -d '{"participants": [{"id": "u1", "name": "Ada", "seed": 1}, {"id": "u2", "name": "Grace"}]}'
//! ```
//!
//! Report a result:
//! ```bash
//! curl -X PATCH http://localhost:6969/api/v1/tournaments/spring-cup/rounds/0/matches/0/result \
//!   -H "Content-Type: application/json" \
//!   -d '{"player1_score": 3, "player2_score": 1}'
//! ```

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use bracket_engine::{
    bracket::{BracketError, Participant},
    tournament::{ResultReport, TournamentError, TournamentId, TournamentState},
    view::BracketView,
};
use serde::{Deserialize, Serialize};

use super::{AppState, request_id::RequestId};
use crate::metrics;

#[derive(Debug, Deserialize)]
pub struct GenerateBracketRequest {
    pub participants: Vec<Participant>,
}

/// Scores are optional in the body so a missing one is reported as invalid input
#[derive(Debug, Deserialize)]
pub struct ReportResultRequest {
    pub player1_score: Option<f64>,
    pub player2_score: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ViewFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    #[serde(default)]
    pub format: ViewFormat,
}

#[derive(Debug, Serialize)]
pub struct TournamentListResponse {
    pub tournaments: Vec<TournamentId>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map a service error to its HTTP status and a client-safe body
pub fn error_response(error: TournamentError) -> ApiError {
    let status = match &error {
        TournamentError::Bracket(BracketError::InvalidInput { .. })
        | TournamentError::InsufficientParticipants { .. } => StatusCode::BAD_REQUEST,
        TournamentError::Bracket(BracketError::IndexOutOfRange { .. })
        | TournamentError::NotFound(_)
        | TournamentError::NotGenerated(_) => StatusCode::NOT_FOUND,
        TournamentError::Store(_) | TournamentError::ActorUnavailable(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    if status.is_server_error() {
        tracing::error!(error = %error, "Tournament operation failed");
    }

    (
        status,
        Json(ErrorResponse {
            error: error.client_message(),
        }),
    )
}

/// Report a malformed request body as invalid input
fn invalid_body(rejection: JsonRejection) -> ApiError {
    error_response(TournamentError::Bracket(BracketError::InvalidInput {
        reason: rejection.body_text(),
    }))
}

/// List stored tournaments.
///
/// # Response
///
/// Returns `200 OK` with `{"tournaments": ["spring-cup", ...]}`
pub async fn list_tournaments(
    State(state): State<AppState>,
) -> Result<Json<TournamentListResponse>, ApiError> {
    let tournaments = state
        .tournament_manager
        .list_ids()
        .await
        .map_err(error_response)?;

    Ok(Json(TournamentListResponse { tournaments }))
}

/// Generate a bracket for a tournament.
///
/// Creates the tournament on first use. Any existing bracket and all of its
/// recorded results are discarded.
///
/// # Errors
///
/// - `400 Bad Request`: Malformed body, too few participants or duplicate participant ids
/// - `500 Internal Server Error`: Store failure
pub async fn generate_bracket(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(tournament_id): Path<TournamentId>,
    payload: Result<Json<GenerateBracketRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TournamentState>), ApiError> {
    let Json(req) = payload.map_err(invalid_body)?;
    let participant_count = req.participants.len();
    let tournament_state = state
        .tournament_manager
        .generate(&tournament_id, req.participants)
        .await
        .map_err(error_response)?;

    tracing::info!(
        request_id = %request_id.as_str(),
        tournament_id = %tournament_id,
        participants = participant_count,
        rounds = tournament_state.document.bracket.round_count(),
        "Bracket generated"
    );
    metrics::brackets_generated_total();
    metrics::bracket_participants(participant_count);
    metrics::active_tournaments(state.tournament_manager.active_count().await);

    Ok((StatusCode::CREATED, Json(tournament_state)))
}

/// Get a tournament's bracket and progress summary.
///
/// # Errors
///
/// - `404 Not Found`: Unknown tournament
pub async fn get_bracket(
    State(state): State<AppState>,
    Path(tournament_id): Path<TournamentId>,
) -> Result<Json<TournamentState>, ApiError> {
    state
        .tournament_manager
        .get_state(&tournament_id)
        .await
        .map(Json)
        .map_err(error_response)
}

/// Get the display projection of a tournament's bracket.
///
/// `?format=text` returns the plain-text rendering instead of JSON.
///
/// # Errors
///
/// - `404 Not Found`: Unknown tournament or no bracket generated
pub async fn get_bracket_view(
    State(state): State<AppState>,
    Path(tournament_id): Path<TournamentId>,
    Query(query): Query<ViewQuery>,
) -> Result<Response, ApiError> {
    let view: BracketView = state
        .tournament_manager
        .get_view(&tournament_id)
        .await
        .map_err(error_response)?;

    Ok(match query.format {
        ViewFormat::Json => Json(view).into_response(),
        ViewFormat::Text => (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            view.render_text(),
        )
            .into_response(),
    })
}

/// Report a match result.
///
/// Round and match indices are zero-based. The winner, if any, advances into
/// the next round immediately.
///
/// # Errors
///
/// - `400 Bad Request`: Missing, non-numeric or non-finite score
/// - `404 Not Found`: Unknown tournament, no bracket, or no such match
pub async fn report_result(
    State(state): State<AppState>,
    request_id: RequestId,
    Path((tournament_id, round_index, match_index)): Path<(TournamentId, usize, usize)>,
    payload: Result<Json<ReportResultRequest>, JsonRejection>,
) -> Result<Json<ResultReport>, ApiError> {
    let Json(req) = payload.map_err(invalid_body)?;
    let (Some(score1), Some(score2)) = (req.player1_score, req.player2_score) else {
        return Err(error_response(TournamentError::Bracket(
            BracketError::InvalidInput {
                reason: "player1_score and player2_score are required".to_string(),
            },
        )));
    };

    let report = state
        .tournament_manager
        .report_result(&tournament_id, round_index, match_index, score1, score2)
        .await
        .map_err(error_response)?;

    tracing::info!(
        request_id = %request_id.as_str(),
        tournament_id = %tournament_id,
        round_index,
        match_index,
        winner = ?report.outcome.winner_id,
        "Match result recorded"
    );
    metrics::results_recorded_total(report.outcome.is_tie());
    if report.completed_tournament {
        metrics::tournaments_completed_total();
    }

    Ok(Json(report))
}

/// Reset a tournament's bracket, keeping the tournament.
///
/// # Errors
///
/// - `404 Not Found`: Unknown tournament
pub async fn reset_bracket(
    State(state): State<AppState>,
    Path(tournament_id): Path<TournamentId>,
) -> Result<StatusCode, ApiError> {
    state
        .tournament_manager
        .reset(&tournament_id)
        .await
        .map_err(error_response)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Remove a tournament and its stored bracket.
///
/// # Errors
///
/// - `404 Not Found`: Unknown tournament
pub async fn remove_tournament(
    State(state): State<AppState>,
    Path(tournament_id): Path<TournamentId>,
) -> Result<StatusCode, ApiError> {
    state
        .tournament_manager
        .remove(&tournament_id)
        .await
        .map_err(error_response)?;

    metrics::active_tournaments(state.tournament_manager.active_count().await);

    Ok(StatusCode::NO_CONTENT)
}
