//! Route definition for the admin library-configuration action.
//!
//! ```text
//! POST /set-image-root      set_image_root
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/set-image-root", post(admin::set_image_root))
}
