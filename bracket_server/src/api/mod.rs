//! HTTP API for the bracket server.
//!
//! # Architecture
//!
//! The API is built with:
//! - **Axum**: Async web framework
//! - **Tower**: Middleware for CORS and request IDs
//! - **Actor Model**: Each tournament's bracket is owned by a dedicated actor task
//!
//! # Modules
//!
//! - [`brackets`]: Bracket generation, reads, result reporting and reset
//! - [`request_id`]: Request correlation IDs
//!
//! # Endpoints Overview
//!
//! ```text
//! GET    /health                                                      - Health check
//! GET    /api/v1/tournaments                                          - List tournaments
//! DELETE /api/v1/tournaments/{tournament_id}                          - Remove tournament
//! POST   /api/v1/tournaments/{tournament_id}/bracket                  - Generate bracket
//! GET    /api/v1/tournaments/{tournament_id}/bracket                  - Bracket + progress
//! DELETE /api/v1/tournaments/{tournament_id}/bracket                  - Reset bracket
//! GET    /api/v1/tournaments/{tournament_id}/bracket/view             - Display projection
//! PATCH  /api/v1/tournaments/{tournament_id}/rounds/{round_index}/matches/{match_index}/result
//!                                                                     - Report result
//! ```
//!
//! # CORS
//!
//! CORS is configured permissively for development. In production, configure
//! appropriate origins, methods, and headers.

pub mod brackets;
pub mod request_id;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get, patch},
};
use bracket_engine::{store::Database, tournament::TournamentManager};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers.
///
/// # Fields
///
/// - `tournament_manager`: Forwards operations to tournament actors
/// - `database`: Connection pool when the postgres backend is in use
#[derive(Clone)]
pub struct AppState {
    pub tournament_manager: Arc<TournamentManager>,
    pub database: Option<Database>,
}

/// Create the complete API router with all endpoints and middleware.
///
/// # Example
///
/// ```rust,no_run
/// # use bracket_server::api::{create_router, AppState};
/// # use bracket_engine::store::MemoryBracketStore;
/// # use bracket_engine::tournament::{ManagerSettings, TournamentManager};
/// # use std::sync::Arc;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let state = AppState {
///     tournament_manager: Arc::new(TournamentManager::new(
///         Arc::new(MemoryBracketStore::new()),
///         ManagerSettings::default(),
///     )),
///     database: None,
/// };
///
/// let app = create_router(state);
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:6969").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", create_v1_router())
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Create API v1 router with all versioned endpoints.
fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/tournaments", get(brackets::list_tournaments))
        .route(
            "/tournaments/{tournament_id}",
            delete(brackets::remove_tournament),
        )
        .route(
            "/tournaments/{tournament_id}/bracket",
            get(brackets::get_bracket)
                .post(brackets::generate_bracket)
                .delete(brackets::reset_bracket),
        )
        .route(
            "/tournaments/{tournament_id}/bracket/view",
            get(brackets::get_bracket_view),
        )
        .route(
            "/tournaments/{tournament_id}/rounds/{round_index}/matches/{match_index}/result",
            patch(brackets::report_result),
        )
}

/// Health check endpoint for monitoring and load balancers.
///
/// Returns `200 OK` when the store is reachable, or `503 Service Unavailable`
/// when the database health check fails.
///
/// ```bash
/// curl http://localhost:6969/health
/// # {"status":"healthy","store":"memory","database":null,"tournaments":{"active_count":0},...}
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database_healthy = match &state.database {
        Some(db) => Some(db.health_check().await.is_ok()),
        None => None,
    };
    let healthy = database_healthy.unwrap_or(true);

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = json!({
        "status": if healthy { "healthy" } else { "unhealthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "store": if state.database.is_some() { "postgres" } else { "memory" },
        "database": database_healthy,
        "tournaments": {
            "active_count": state.tournament_manager.active_count().await,
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status_code, Json(response))
}
