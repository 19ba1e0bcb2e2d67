//! Route definitions for favorites records and the derived user list.
//!
//! ```text
//! GET  /favorites/{username}                get_favorites
//! POST /favorites/{username}/{imageId}      toggle_favorite
//! GET  /users                               list_users
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::favorites;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/favorites/{username}", get(favorites::get_favorites))
        .route(
            "/favorites/{username}/{imageId}",
            post(favorites::toggle_favorite),
        )
        .route("/users", get(favorites::list_users))
}
