//! Route definitions for the gallery listing and media file serving.
//!
//! ```text
//! GET /images              list_images (cursor, limit, favUser)
//! GET /media/{*filename}   serve_media
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::gallery;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/images", get(gallery::list_images))
        .route("/media/{*filename}", get(gallery::serve_media))
}
