//! REST API for the session registry
//!
//! Action-tagged JSON envelopes under `/api`, plus an unprefixed health
//! probe. Every response body is JSON and every failure is shaped as
//! `{"error": message}` with the matching HTTP status, so browser-hosted
//! game clients can consume the API directly (CORS is wide open).

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use matchpoint_registry_core::{RegistryError, Session, SessionDescriptor, SessionRegistry};

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SessionRegistry>,
    /// Process start, for the uptime figure in health reports.
    pub started_at: Instant,
}

impl AppState {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self {
            registry,
            started_at: Instant::now(),
        }
    }
}

/// Build the full router: game routes under `/api`, health at the root,
/// permissive CORS, request tracing.
pub fn create_router(state: AppState) -> Router {
    use tower_http::cors::{Any, CorsLayer};
    use tower_http::trace::TraceLayer;

    let games = Router::new()
        .route(
            "/games",
            get(list_games).post(register_game).delete(unregister_game),
        )
        .route("/games/:code", get(get_game).put(update_game));

    Router::new()
        .nest("/api", games)
        .route("/health", get(health))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ===== Wire types =====

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    game_data: Option<SessionDescriptor>,
}

#[derive(Debug, Deserialize)]
struct UpdatePlayersRequest {
    current_players: u32,
}

#[derive(Debug, Deserialize)]
struct UnregisterRequest {
    game_code: Option<String>,
}

#[derive(Debug, Serialize)]
struct RegisterResponse {
    action: &'static str,
    success: bool,
    game_code: String,
}

#[derive(Debug, Serialize)]
struct GamesListResponse {
    action: &'static str,
    games: Vec<Session>,
    count: usize,
}

#[derive(Debug, Serialize)]
struct GameInfoResponse {
    action: &'static str,
    game: Session,
}

#[derive(Debug, Serialize)]
struct AckResponse {
    action: &'static str,
    success: bool,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    games_count: usize,
    uptime: f64,
}

// ===== Error mapping =====

/// Transport-level failure, mapped onto status codes and wire messages.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Invalid request body")]
    InvalidBody(#[from] JsonRejection),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Registry(RegistryError::InvalidDescriptor) => {
                (StatusCode::BAD_REQUEST, "Invalid game data")
            }
            ApiError::Registry(RegistryError::InvalidHostName) => {
                (StatusCode::BAD_REQUEST, "Invalid host name")
            }
            ApiError::Registry(RegistryError::InvalidMaxPlayers) => {
                (StatusCode::BAD_REQUEST, "Invalid max players")
            }
            ApiError::Registry(RegistryError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "Game not found")
            }
            ApiError::Registry(RegistryError::Internal(detail)) => {
                // Detail stays in the log; the wire gets a generic message.
                error!("Internal registry error: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            ApiError::InvalidBody(rejection) => {
                debug!("Rejected request body: {}", rejection);
                (StatusCode::BAD_REQUEST, "Invalid request body")
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

// ===== Handlers =====

/// POST /api/games
async fn register_game(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let Json(request) = body?;
    let descriptor = request.game_data.ok_or(RegistryError::InvalidDescriptor)?;
    let game_code = state.registry.register(descriptor).await?;

    Ok(Json(RegisterResponse {
        action: "game_registered",
        success: true,
        game_code,
    }))
}

/// GET /api/games
async fn list_games(State(state): State<AppState>) -> Json<GamesListResponse> {
    let games = state.registry.list_public().await;
    let count = games.len();

    Json(GamesListResponse {
        action: "games_list",
        games,
        count,
    })
}

/// GET /api/games/:code
async fn get_game(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<GameInfoResponse>, ApiError> {
    let game = state.registry.get(&code).await?;

    Ok(Json(GameInfoResponse {
        action: "game_info",
        game,
    }))
}

/// PUT /api/games/:code
async fn update_game(
    State(state): State<AppState>,
    Path(code): Path<String>,
    body: Result<Json<UpdatePlayersRequest>, JsonRejection>,
) -> Result<Json<AckResponse>, ApiError> {
    let Json(request) = body?;
    state
        .registry
        .update_players(&code, request.current_players)
        .await?;

    Ok(Json(AckResponse {
        action: "game_updated",
        success: true,
    }))
}

/// DELETE /api/games
async fn unregister_game(
    State(state): State<AppState>,
    body: Result<Json<UnregisterRequest>, JsonRejection>,
) -> Result<Json<AckResponse>, ApiError> {
    let Json(request) = body?;
    // An absent code falls through to the registry lookup and reads as
    // not-found, the same as a stale one.
    let code = request.game_code.unwrap_or_default();
    state.registry.unregister(&code).await?;

    Ok(Json(AckResponse {
        action: "game_unregistered",
        success: true,
    }))
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        games_count: state.registry.count().await,
        uptime: state.started_at.elapsed().as_secs_f64(),
    })
}
