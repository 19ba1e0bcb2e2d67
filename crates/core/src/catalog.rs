//! Directory catalog: list, classify, and order the media files under a
//! root directory.
//!
//! A catalog is materialized fresh on every request. There is deliberately
//! no cache: directory contents may change between calls, and position
//! cursors must always index into the real, current ordering.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::CoreError;
use crate::ordering::natural_cmp;

/// Image extensions accepted by the catalog (matched case-insensitively).
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "webp", "svg", "tiff", "tif", "ico", "heic", "heif",
    "avif", "jfif", "pjpeg", "pjp",
];

/// Video extensions accepted by the catalog (matched case-insensitively).
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "avi", "mov", "wmv", "flv", "webm", "mkv", "m4v", "3gp",
];

/// Media classification, derived once from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify an extension (without the dot). Returns `None` for
    /// anything outside the allow-list.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Video)
        } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Image)
        } else {
            None
        }
    }

    /// Classify a file name by its extension.
    pub fn from_name(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension()?.to_str()?;
        Self::from_extension(ext)
    }
}

/// One media file, as observed at listing time.
///
/// The file name is the identity: it is unique within a root (filesystem
/// guarantee) and doubles as the favorite key.
#[derive(Debug, Clone, Serialize)]
pub struct MediaEntry {
    pub name: String,
    pub kind: MediaKind,
    pub size_bytes: u64,
    pub modified_at: DateTime<Utc>,
}

impl MediaEntry {
    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }
}

/// Lists and orders the media files directly under one root directory.
#[derive(Debug, Clone)]
pub struct MediaCatalog {
    root: PathBuf,
}

impl MediaCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List the catalog: immediate children only, filtered to the media
    /// allow-list, sorted naturally by name.
    ///
    /// An unreadable root is `CoreError::RootUnavailable`; callers in the
    /// browsing flow treat that as an empty catalog. A file that vanishes
    /// between the directory read and its stat is skipped, not an error.
    pub async fn list(&self) -> Result<Vec<MediaEntry>, CoreError> {
        let mut dir =
            tokio::fs::read_dir(&self.root)
                .await
                .map_err(|source| CoreError::RootUnavailable {
                    path: self.root.clone(),
                    source,
                })?;

        let mut entries = Vec::new();
        loop {
            let dirent = match dir.next_entry().await {
                Ok(Some(d)) => d,
                Ok(None) => break,
                Err(source) => {
                    return Err(CoreError::RootUnavailable {
                        path: self.root.clone(),
                        source,
                    })
                }
            };

            let name = match dirent.file_name().into_string() {
                Ok(n) => n,
                // Non-UTF-8 names cannot round-trip through the JSON API.
                Err(_) => continue,
            };

            let Some(kind) = MediaKind::from_name(&name) else {
                continue;
            };

            let metadata = match dirent.metadata().await {
                Ok(m) => m,
                Err(err) => {
                    tracing::warn!(name = %name, error = %err, "Skipping unreadable entry");
                    continue;
                }
            };
            if !metadata.is_file() {
                continue;
            }

            let modified_at = metadata
                .modified()
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(|_| Utc::now());

            entries.push(MediaEntry {
                name,
                kind,
                size_bytes: metadata.len(),
                modified_at,
            });
        }

        entries.sort_by(|a, b| natural_cmp(&a.name, &b.name));
        Ok(entries)
    }
}
