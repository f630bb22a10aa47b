//! Emote CRUD handlers.
//!
//! Thin adapters over [`EmoteRepository`](crate::repository::EmoteRepository):
//! they decode the request, validate it, call the repository and map the
//! outcome to a status code.

use std::collections::BTreeMap;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use emotes_core::emote::Emote;
use emotes_core::storage::ScanFilterFragment;

use crate::{
    handlers::AppError,
    models::{CreateEmote, UpdateEmote},
    state::AppState,
};

/// Error response with message.
fn error_response(status: StatusCode, message: impl Into<String>) -> (StatusCode, String) {
    let msg = message.into();
    tracing::warn!(status = %status, message = %msg, "API error");
    (status, msg)
}

/// List emotes (GET /api/emotes).
///
/// Every query parameter becomes an equality fragment on the attribute of the
/// same name, e.g. `?trigger=hi`. See [`EmoteRepository::list`] for how a
/// store treats the resulting filter.
///
/// [`EmoteRepository::list`]: crate::repository::EmoteRepository::list
pub async fn list_emotes(
    State(state): State<AppState>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Json<Vec<Emote>> {
    let fragments: Vec<ScanFilterFragment> = query
        .into_iter()
        .map(|(key, value)| ScanFilterFragment::equals(key, value))
        .collect();

    Json(state.emotes.list(&fragments).await)
}

/// Create a new emote (POST /api/emotes).
pub async fn create_emote(
    State(state): State<AppState>,
    payload: Result<Json<CreateEmote>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    tracing::debug!(payload = ?payload, "Received create emote request");

    let new_emote = payload.into_new_emote();
    new_emote.validate()?;

    let emote = state.emotes.create(new_emote).await?;

    Ok((StatusCode::CREATED, Json(emote)))
}

/// Get a single emote by ID (GET /api/emotes/{id}).
pub async fn get_emote(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Emote>, (StatusCode, String)> {
    state
        .emotes
        .get(&id)
        .await
        .map(Json)
        .ok_or_else(|| error_response(StatusCode::NOT_FOUND, format!("Emote {id} not found")))
}

/// Update an emote (PUT /api/emotes/{id}).
///
/// Only the fields present in the body are changed.
pub async fn update_emote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateEmote>, JsonRejection>,
) -> Result<Json<Emote>, axum::response::Response> {
    let Json(payload) = payload.map_err(|e| AppError::from(e).into_response())?;

    let patch = payload.into_patch(id.clone());
    patch
        .validate()
        .map_err(|e| AppError::from(e).into_response())?;

    state.emotes.update(patch).await.map(Json).ok_or_else(|| {
        error_response(StatusCode::NOT_FOUND, format!("Emote {id} not found")).into_response()
    })
}

/// Delete an emote (DELETE /api/emotes/{id}).
pub async fn delete_emote(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    if state.emotes.delete(&id).await {
        tracing::info!(emote_id = %id, "Deleted emote");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to delete emote {id}"),
        ))
    }
}
