//! Handlers for the gallery surface: paginated listing and raw media
//! serving.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use pixwall_core::mediapath::resolve_media_path;
use pixwall_core::{CatalogPaginator, CoreError, GalleryEntry, PageQuery, PageResult};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Page size when the client sends no `limit`.
const DEFAULT_PAGE_SIZE: usize = 20;
/// Upper bound on `limit`; keeps one query from stat-ing an unbounded page.
const MAX_PAGE_SIZE: usize = 500;

/// Placeholder display dimensions. Real dimension extraction is out of
/// scope; the grid only needs a consistent aspect hint.
const PLACEHOLDER_WIDTH: u32 = 300;
const PLACEHOLDER_HEIGHT: u32 = 200;

/// Characters escaped in media URLs: everything `encodeURIComponent`
/// escapes (alphanumerics and `-_.~` pass through).
const URL_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Query parameters for `GET /images`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagesParams {
    /// Resume offset as a decimal string; defaults to "0".
    pub cursor: Option<String>,
    pub limit: Option<usize>,
    /// When present, selects favorites-only mode for that user.
    pub fav_user: Option<String>,
}

/// One gallery item on the wire.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    /// The file name, which is also the favorite key.
    pub id: String,
    pub name: String,
    /// Server-relative URL the grid can load directly.
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub is_favorited: bool,
    pub size: u64,
    pub modified_time: DateTime<Utc>,
    pub is_video: bool,
}

impl From<GalleryEntry> for MediaItem {
    fn from(item: GalleryEntry) -> Self {
        let name = item.entry.name;
        let url = format!("/media/{}", utf8_percent_encode(&name, URL_COMPONENT));
        Self {
            id: name.clone(),
            url,
            width: PLACEHOLDER_WIDTH,
            height: PLACEHOLDER_HEIGHT,
            is_favorited: item.is_favorited,
            size: item.entry.size_bytes,
            modified_time: item.entry.modified_at,
            is_video: item.entry.kind == pixwall_core::MediaKind::Video,
            name,
        }
    }
}

/// Response body for `GET /images`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagesResponse {
    pub items: Vec<MediaItem>,
    pub next_cursor: Option<String>,
    pub total: usize,
    pub current_page: usize,
    pub total_pages: usize,
}

impl From<PageResult> for ImagesResponse {
    fn from(page: PageResult) -> Self {
        Self {
            items: page.items.into_iter().map(MediaItem::from).collect(),
            next_cursor: page.next_cursor,
            total: page.total,
            current_page: page.current_page,
            total_pages: page.total_pages,
        }
    }
}

/// GET /images
///
/// No configured root is a valid state: the response is the empty,
/// cursor-exhausted result, never an error.
pub async fn list_images(
    State(state): State<AppState>,
    Query(params): Query<ImagesParams>,
) -> AppResult<Json<ImagesResponse>> {
    let Some(library) = state.library_snapshot().await else {
        return Ok(Json(PageResult::empty().into()));
    };

    let offset: usize = params
        .cursor
        .as_deref()
        .unwrap_or("0")
        .parse()
        .map_err(|_| AppError::BadRequest("cursor must be a non-negative integer".to_string()))?;

    let limit = params
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    // Clients send an empty favUser to mean "not filtering".
    let fav_user = params.fav_user.filter(|u| !u.is_empty());

    let query = PageQuery {
        offset,
        limit,
        fav_user: fav_user.clone(),
        viewer: fav_user,
    };

    let paginator = CatalogPaginator::new(library, Arc::clone(&state.favorites));
    let page = paginator.page(&query).await?;
    Ok(Json(page.into()))
}

/// GET /media/{*filename}
///
/// Serves raw bytes with a MIME type derived from the extension. Traversal
/// attempts are a hard 403; anything not under the root's allow-list is a
/// 404. Uses a wildcard capture so multi-segment traversal paths reach the
/// guard instead of falling through to the router's 404.
pub async fn serve_media(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> AppResult<Response> {
    let Some(library) = state.library_snapshot().await else {
        return Err(AppError::Core(CoreError::NotFound(filename)));
    };

    let path = resolve_media_path(&library.root, &filename).await?;
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| CoreError::NotFound(filename))?;

    let mime = mime_guess::from_path(&path).first_or_octet_stream();
    Ok((
        [
            (header::CONTENT_TYPE, mime.essence_str().to_string()),
            (header::CACHE_CONTROL, "public, max-age=3600".to_string()),
        ],
        bytes,
    )
        .into_response())
}
