use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::app::{App, AppError, Selection, SessionView};
use crate::models::*;

// ============================================================
// Error Handling
// ============================================================

/// Map an application error to a status code and message.
///
/// Validation errors are returned as-is. Storage failures are logged
/// server-side and clients only see a generic message.
fn app_error(e: AppError) -> (StatusCode, String) {
    let status = match &e {
        AppError::NoSession
        | AppError::SlotOutOfRange { .. }
        | AppError::NotInDeck(_)
        | AppError::Reading(_) => StatusCode::BAD_REQUEST,
        AppError::NotReady { .. } => StatusCode::CONFLICT,
        AppError::Deck(_) => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Storage(_) => {
            tracing::error!("Internal error: {:#}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            );
        }
    };

    tracing::warn!("Validation error: {}", e);
    (status, e.to_string())
}

fn not_found(what: &str) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("{} not found", what))
}

// ============================================================
// Health
// ============================================================

pub async fn health(State(app): State<App>) -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok", "cards": app.catalog().len() }))
}

// ============================================================
// Spreads
// ============================================================

#[derive(Debug, Deserialize)]
pub struct SelectSpreadInput {
    pub spread: SpreadId,
}

pub async fn list_spreads(State(app): State<App>) -> Json<Vec<Spread>> {
    Json(app.spreads())
}

pub async fn get_selected_spread(
    State(app): State<App>,
) -> Result<Json<Spread>, (StatusCode, String)> {
    app.selected_spread().map(Json).map_err(app_error)
}

pub async fn select_spread(
    State(app): State<App>,
    Json(input): Json<SelectSpreadInput>,
) -> Result<Json<Spread>, (StatusCode, String)> {
    app.select_spread(input.spread).map(Json).map_err(app_error)
}

// ============================================================
// Card Selection
// ============================================================

/// A pick by deck slot or by card name. The slot wins when both are given.
#[derive(Debug, Deserialize)]
pub struct SelectCardInput {
    pub slot: Option<usize>,
    pub name: Option<String>,
}

pub async fn start_session(
    State(app): State<App>,
) -> Result<(StatusCode, Json<SessionView>), (StatusCode, String)> {
    app.start_session(&mut rand::thread_rng())
        .map(|view| (StatusCode::CREATED, Json(view)))
        .map_err(app_error)
}

pub async fn get_session(
    State(app): State<App>,
) -> Result<Json<SessionView>, (StatusCode, String)> {
    app.session()
        .map(Json)
        .ok_or_else(|| not_found("Card selection"))
}

pub async fn select_card(
    State(app): State<App>,
    Json(input): Json<SelectCardInput>,
) -> Result<Json<Selection>, (StatusCode, String)> {
    let selection = match (input.slot, input.name) {
        (Some(slot), _) => app.select_slot(slot),
        (None, Some(name)) => app.select_card(&name),
        (None, None) => {
            return Err((
                StatusCode::BAD_REQUEST,
                "Either slot or name is required".to_string(),
            ))
        }
    };
    selection.map(Json).map_err(app_error)
}

pub async fn complete_reading(
    State(app): State<App>,
) -> Result<(StatusCode, Json<Reading>), (StatusCode, String)> {
    app.complete_reading(Utc::now())
        .map(|r| (StatusCode::CREATED, Json(r)))
        .map_err(app_error)
}

// ============================================================
// Readings
// ============================================================

pub async fn get_reading(
    State(app): State<App>,
) -> Result<Json<ReadingView>, (StatusCode, String)> {
    app.reading_view(&mut rand::thread_rng())
        .map_err(app_error)?
        .map(Json)
        .ok_or_else(|| not_found("Reading"))
}

pub async fn share_reading(State(app): State<App>) -> Result<String, (StatusCode, String)> {
    app.share_text()
        .map_err(app_error)?
        .ok_or_else(|| not_found("Reading"))
}

// ============================================================
// History
// ============================================================

pub async fn list_history(State(app): State<App>) -> Result<Json<History>, (StatusCode, String)> {
    app.history().map(Json).map_err(app_error)
}

pub async fn clear_history(State(app): State<App>) -> Result<Json<Notice>, (StatusCode, String)> {
    app.clear_history().map(Json).map_err(app_error)
}

pub async fn history_stats(
    State(app): State<App>,
) -> Result<Json<HistoryStats>, (StatusCode, String)> {
    app.history_stats(Utc::now()).map(Json).map_err(app_error)
}

pub async fn view_history_reading(
    State(app): State<App>,
    Path(id): Path<Uuid>,
) -> Result<Json<Reading>, (StatusCode, String)> {
    app.view_history_reading(id)
        .map_err(app_error)?
        .map(Json)
        .ok_or_else(|| not_found("Reading"))
}

// ============================================================
// Catalog
// ============================================================

pub async fn get_card(
    State(app): State<App>,
    Path(name): Path<String>,
) -> Result<Json<Card>, (StatusCode, String)> {
    app.card(&name).map(Json).ok_or_else(|| not_found("Card"))
}
