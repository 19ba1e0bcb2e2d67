use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether an admin has configured a media root yet.
    pub image_root_set: bool,
    /// Active project name, `null` until configured.
    pub project_name: Option<String>,
}

/// GET /health -- service status plus library configuration state.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let library = state.library_snapshot().await;

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        image_root_set: library.is_some(),
        project_name: library.map(|l| l.project),
    })
}

/// Mount health check routes (intended for root-level mounting).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
