//! Cursor-based pagination over a catalog, combined with the favorites
//! store.
//!
//! Three mutually exclusive query shapes:
//!
//! 1. paged-all: slice `[offset, offset+limit)` of the full sorted catalog;
//! 2. favorites-only: a user's favorites, returned whole, never paged;
//! 3. jump: paged-all with a caller-chosen offset (not a distinct mode).
//!
//! The full catalog is recomputed on every call. That trades CPU for
//! correctness under change: directory contents may differ between calls,
//! and a cache could hand out entries that no longer exist. Target
//! directory sizes (hundreds to low thousands of files) make this cheap.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use crate::catalog::{MediaCatalog, MediaEntry};
use crate::error::CoreError;
use crate::favorites::FavoritesStore;

/// The active root directory and project namespace, passed to components
/// at construction instead of living in process-wide globals.
#[derive(Debug, Clone)]
pub struct MediaLibrary {
    pub root: PathBuf,
    pub project: String,
}

/// One pagination request.
#[derive(Debug, Clone, Default)]
pub struct PageQuery {
    /// Zero-based offset into the sorted catalog (decoded cursor).
    pub offset: usize,
    /// Page size. Ignored in favorites-only mode.
    pub limit: usize,
    /// When set, selects favorites-only mode for this user.
    pub fav_user: Option<String>,
    /// User whose favorites drive `is_favorited` enrichment in paged mode.
    /// Favorites-only mode always enriches relative to `fav_user`.
    pub viewer: Option<String>,
}

/// A catalog entry enriched with favorite state for the requesting context.
#[derive(Debug, Clone, Serialize)]
pub struct GalleryEntry {
    #[serde(flatten)]
    pub entry: MediaEntry,
    pub is_favorited: bool,
}

/// One page of results plus the cursor to resume from.
#[derive(Debug, Clone, Serialize)]
pub struct PageResult {
    pub items: Vec<GalleryEntry>,
    /// Decimal offset of the next page; `None` signals end-of-list.
    pub next_cursor: Option<String>,
    pub total: usize,
    /// Derived for UI display, not authoritative state.
    pub current_page: usize,
    pub total_pages: usize,
}

impl PageResult {
    /// The empty, cursor-exhausted result used when no root is configured
    /// or the root is unavailable. "No root" is a valid state, not an
    /// error at this layer.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_cursor: None,
            total: 0,
            current_page: 1,
            total_pages: 0,
        }
    }
}

/// Combines the catalog with the favorites store to answer page queries.
pub struct CatalogPaginator {
    library: MediaLibrary,
    store: Arc<FavoritesStore>,
}

impl CatalogPaginator {
    pub fn new(library: MediaLibrary, store: Arc<FavoritesStore>) -> Self {
        Self { library, store }
    }

    /// Answer one query. `RootUnavailable` degrades to the empty exhausted
    /// result; favorites-store errors (beyond the corrupt-record degrade
    /// inside the store) propagate.
    pub async fn page(&self, query: &PageQuery) -> Result<PageResult, CoreError> {
        let catalog = MediaCatalog::new(&self.library.root);
        let entries = match catalog.list().await {
            Ok(entries) => entries,
            Err(CoreError::RootUnavailable { path, source }) => {
                tracing::warn!(path = %path.display(), error = %source, "Media root unavailable, returning empty page");
                return Ok(PageResult::empty());
            }
            Err(err) => return Err(err),
        };

        match &query.fav_user {
            Some(username) => self.favorites_page(entries, username).await,
            None => self.catalog_page(entries, query).await,
        }
    }

    /// Favorites-only mode: exhaustive, never paged. Favorite ids with no
    /// matching catalog entry (file since removed) are dropped, not
    /// returned as phantoms.
    async fn favorites_page(
        &self,
        entries: Vec<MediaEntry>,
        username: &str,
    ) -> Result<PageResult, CoreError> {
        let favorites: HashSet<String> = self
            .store
            .user_favorites(&self.library.project, username)
            .await?
            .into_iter()
            .collect();

        let items: Vec<GalleryEntry> = entries
            .into_iter()
            .filter(|entry| favorites.contains(&entry.name))
            .map(|entry| GalleryEntry {
                entry,
                is_favorited: true,
            })
            .collect();

        let total = items.len();
        Ok(PageResult {
            items,
            next_cursor: None,
            total,
            current_page: 1,
            total_pages: 1,
        })
    }

    /// Paged-all mode (jump is this mode with a caller-chosen offset).
    async fn catalog_page(
        &self,
        entries: Vec<MediaEntry>,
        query: &PageQuery,
    ) -> Result<PageResult, CoreError> {
        let limit = query.limit.max(1);
        let offset = query.offset;
        let total = entries.len();

        let viewer_favorites: HashSet<String> = match &query.viewer {
            Some(viewer) => self
                .store
                .user_favorites(&self.library.project, viewer)
                .await?
                .into_iter()
                .collect(),
            None => HashSet::new(),
        };

        // Out-of-range offsets yield an empty slice, not an error.
        let items: Vec<GalleryEntry> = entries
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|entry| {
                let is_favorited = viewer_favorites.contains(&entry.name);
                GalleryEntry { entry, is_favorited }
            })
            .collect();

        let next_cursor = if offset + limit < total {
            Some((offset + limit).to_string())
        } else {
            None
        };

        Ok(PageResult {
            items,
            next_cursor,
            total,
            current_page: offset / limit + 1,
            total_pages: total.div_ceil(limit),
        })
    }
}
