//! Axum route handlers for the Bot API.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::auth::extract::AuthUser;
use crate::bot::runner::BotStatus;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/bot/run
/// Fire-and-forget: returns as soon as the process is spawned.
pub async fn handle_run_bot(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Value>, AppError> {
    state.bot.start().await?;
    Ok(Json(json!({ "status": "started" })))
}

/// GET /api/bot/status
pub async fn handle_bot_status(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<BotStatus>, AppError> {
    Ok(Json(state.bot.status().await))
}
