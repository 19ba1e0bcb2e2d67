//! Handler for the admin `set-image-root` action.

use std::path::PathBuf;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use pixwall_core::MediaLibrary;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetImageRootRequest {
    pub path: Option<String>,
    pub project_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetImageRootResponse {
    pub success: bool,
    pub path: String,
    pub project_name: String,
}

/// POST /set-image-root
///
/// Validates that both fields are present and the path is an existing
/// directory, then swaps the active library. Last writer wins; nothing
/// guards concurrent calls.
pub async fn set_image_root(
    State(state): State<AppState>,
    Json(input): Json<SetImageRootRequest>,
) -> AppResult<Json<SetImageRootResponse>> {
    let path = input
        .path
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::BadRequest("Both path and projectName are required".to_string()))?;
    let project = input
        .project_name
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::BadRequest("Both path and projectName are required".to_string()))?;

    let root = PathBuf::from(path);
    match tokio::fs::metadata(&root).await {
        Ok(metadata) if metadata.is_dir() => {}
        _ => {
            return Err(AppError::BadRequest(
                "The given path does not exist".to_string(),
            ))
        }
    }

    let library = MediaLibrary {
        root,
        project: project.to_string(),
    };
    tracing::info!(root = %library.root.display(), project = %library.project, "Media root configured");
    *state.library.write().await = Some(library);

    Ok(Json(SetImageRootResponse {
        success: true,
        path: path.to_string(),
        project_name: project.to_string(),
    }))
}
