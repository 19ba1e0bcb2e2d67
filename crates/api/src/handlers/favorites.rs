//! Handlers for favorites records and the users derived from them.
//!
//! All three endpoints require an active project; before `set-image-root`
//! there is no record file to read, so they answer 400.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use pixwall_core::MediaLibrary;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub is_favorited: bool,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<String>,
}

async fn require_project(state: &AppState) -> AppResult<MediaLibrary> {
    state
        .library_snapshot()
        .await
        .ok_or_else(|| AppError::BadRequest("No project is active".to_string()))
}

/// GET /favorites/{username}
pub async fn get_favorites(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<FavoritesResponse>> {
    let library = require_project(&state).await?;
    let favorites = state
        .favorites
        .user_favorites(&library.project, &username)
        .await?;
    Ok(Json(FavoritesResponse { favorites }))
}

/// POST /favorites/{username}/{imageId} -- toggles, returns the new state.
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path((username, image_id)): Path<(String, String)>,
) -> AppResult<Json<ToggleResponse>> {
    let library = require_project(&state).await?;
    let is_favorited = state
        .favorites
        .toggle(&library.project, &username, &image_id)
        .await?;

    tracing::debug!(project = %library.project, %username, %image_id, is_favorited, "Toggled favorite");
    Ok(Json(ToggleResponse { is_favorited }))
}

/// GET /users -- usernames present in the active project's record.
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<UsersResponse>> {
    let library = require_project(&state).await?;
    let users = state.favorites.list_users(&library.project).await?;
    Ok(Json(UsersResponse { users }))
}
