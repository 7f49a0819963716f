//! HTTP handlers — thin adapters from JSON requests to `ChatService` calls.

use axum::extract::{Path, State};
use axum::response::Html;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use llamawiz_chat::{LoadedSession, NewSession, SessionListEntry, TurnOutput};
use llamawiz_core::session::SessionId;
use llamawiz_core::types::Exchange;

use crate::error::ApiError;
use crate::server::AppState;

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Body of `POST .../load`.
#[derive(Debug, Deserialize)]
pub struct LoadRequest {
    /// Session id, or a session title.
    pub identifier: String,
}

/// Body of `POST .../chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<Exchange>,
}

/// Response of `POST /api/connect`.
#[derive(Debug, Serialize)]
pub struct ConnectResponse {
    pub connection: String,
    pub session: SessionId,
    pub history: Vec<Exchange>,
    pub sessions: Vec<SessionListEntry>,
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Open a connection and start its first session, as a page load does.
pub async fn connect(State(state): State<AppState>) -> Result<Json<ConnectResponse>, ApiError> {
    let connection = state.connections.open();
    let created = state
        .connections
        .update(&connection, |ctx| state.service.new_session(ctx))
        .ok_or_else(|| ApiError::UnknownConnection(connection.clone()))?;

    Ok(Json(ConnectResponse {
        connection,
        session: created.id,
        history: created.history,
        sessions: created.sessions,
    }))
}

pub async fn new_session(
    State(state): State<AppState>,
    Path(connection): Path<String>,
) -> Result<Json<NewSession>, ApiError> {
    state
        .connections
        .update(&connection, |ctx| state.service.new_session(ctx))
        .map(Json)
        .ok_or(ApiError::UnknownConnection(connection))
}

pub async fn list_sessions(
    State(state): State<AppState>,
    Path(connection): Path<String>,
) -> Result<Json<Vec<SessionListEntry>>, ApiError> {
    let ctx = state
        .connections
        .get(&connection)
        .ok_or(ApiError::UnknownConnection(connection))?;
    Ok(Json(state.service.list_sessions(&ctx)))
}

pub async fn load_session(
    State(state): State<AppState>,
    Path(connection): Path<String>,
    Json(body): Json<LoadRequest>,
) -> Result<Json<LoadedSession>, ApiError> {
    state
        .connections
        .update(&connection, |ctx| state.service.load_session(ctx, &body.identifier))
        .map(Json)
        .ok_or(ApiError::UnknownConnection(connection))
}

pub async fn submit_turn(
    State(state): State<AppState>,
    Path(connection): Path<String>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<TurnOutput>, ApiError> {
    // Snapshot: the registry lock is not held while the endpoint thinks.
    let ctx = state
        .connections
        .get(&connection)
        .ok_or(ApiError::UnknownConnection(connection))?;

    let output = state
        .service
        .submit_turn(&ctx, &body.message, body.history)
        .await;
    Ok(Json(output))
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
