use std::sync::Arc;

use tokio::sync::RwLock;

use pixwall_core::{FavoritesStore, MediaLibrary};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The active media root and project, set by `set-image-root`.
    ///
    /// The one piece of process-wide mutable state. `None` until an admin
    /// configures it; concurrent writes are last-writer-wins.
    pub library: Arc<RwLock<Option<MediaLibrary>>>,
    /// Favorites record store (one JSON file per project under `data_dir`).
    pub favorites: Arc<FavoritesStore>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let favorites = Arc::new(FavoritesStore::new(config.data_dir.clone()));
        Self {
            config: Arc::new(config),
            library: Arc::new(RwLock::new(None)),
            favorites,
        }
    }

    /// Snapshot the active library, if one has been configured.
    pub async fn library_snapshot(&self) -> Option<MediaLibrary> {
        self.library.read().await.clone()
    }
}
