//! Route tree assembly.

pub mod admin;
pub mod favorites;
pub mod gallery;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree (health excluded; it is merged at the
/// root by the router builder).
///
/// ```text
/// POST /set-image-root                      configure root + project (admin action)
/// GET  /images                              paged catalog / favorites-only listing
/// GET  /media/{*filename}                   raw media bytes
/// GET  /favorites/{username}                a user's favorite ids
/// POST /favorites/{username}/{imageId}      toggle a favorite
/// GET  /users                               usernames with favorites
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(admin::router())
        .merge(gallery::router())
        .merge(favorites::router())
}
