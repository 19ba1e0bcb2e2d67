//! JSON-file-backed favorites store.
//!
//! One record file per project, `<data_dir>/<project>.json`, shaped
//! `{ [username]: string[] }`. The whole record is loaded on each read and
//! rewritten on each save; a store-level mutex serializes the
//! load-mutate-save sequence so concurrent toggles cannot lose updates
//! within one process.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tokio::sync::Mutex;

use crate::error::CoreError;

/// Per-project favorites: username -> insertion-ordered list of media ids.
///
/// Stored as a list, semantically a set: no duplicates, membership is all
/// that matters.
pub type FavoritesRecord = IndexMap<String, Vec<String>>;

/// Persists favorites records under a data directory.
pub struct FavoritesStore {
    data_dir: PathBuf,
    /// Serializes load-mutate-save sequences across concurrent requests.
    write_lock: Mutex<()>,
}

impl FavoritesStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn record_path(&self, project: &str) -> PathBuf {
        self.data_dir.join(format!("{project}.json"))
    }

    /// Load a project's record. A missing file is an empty record, not an
    /// error; an unparsable file is `CoreError::CorruptRecord`.
    pub async fn load(&self, project: &str) -> Result<FavoritesRecord, CoreError> {
        let path = self.record_path(project);
        let bytes = match tokio::fs::read(&path).await {
            Ok(b) => b,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(FavoritesRecord::new())
            }
            Err(err) => return Err(CoreError::Io(err)),
        };

        serde_json::from_slice(&bytes).map_err(|source| CoreError::CorruptRecord {
            project: project.to_string(),
            source,
        })
    }

    /// Load with the documented degrade policy: a corrupt record is logged
    /// and treated as empty. Accepted data-loss risk for this tool; the next
    /// save overwrites the broken file.
    pub async fn load_or_empty(&self, project: &str) -> Result<FavoritesRecord, CoreError> {
        match self.load(project).await {
            Ok(record) => Ok(record),
            Err(CoreError::CorruptRecord { project, source }) => {
                tracing::warn!(%project, error = %source, "Corrupt favorites record, treating as empty");
                Ok(FavoritesRecord::new())
            }
            Err(err) => Err(err),
        }
    }

    /// Serialize the full record and overwrite the project's file.
    pub async fn save(&self, project: &str, record: &FavoritesRecord) -> Result<(), CoreError> {
        tokio::fs::create_dir_all(&self.data_dir).await?;
        // Pretty-printed so record files stay hand-editable.
        let json = serde_json::to_vec_pretty(record).expect("record serialization cannot fail");
        tokio::fs::write(self.record_path(project), json).await?;
        Ok(())
    }

    /// Flip `media_id` in `username`'s set and persist. Returns the new
    /// membership state.
    ///
    /// The load-flip-save sequence spans two suspension points; the store
    /// mutex makes it atomic with respect to other toggles on this store.
    pub async fn toggle(
        &self,
        project: &str,
        username: &str,
        media_id: &str,
    ) -> Result<bool, CoreError> {
        let _guard = self.write_lock.lock().await;

        let mut record = self.load_or_empty(project).await?;
        let favorites = record.entry(username.to_string()).or_default();

        let is_favorited = match favorites.iter().position(|id| id == media_id) {
            Some(index) => {
                favorites.remove(index);
                false
            }
            None => {
                favorites.push(media_id.to_string());
                true
            }
        };

        self.save(project, &record).await?;
        Ok(is_favorited)
    }

    /// A user's favorite ids, in insertion order. Empty for unknown users.
    pub async fn user_favorites(
        &self,
        project: &str,
        username: &str,
    ) -> Result<Vec<String>, CoreError> {
        let record = self.load_or_empty(project).await?;
        Ok(record.get(username).cloned().unwrap_or_default())
    }

    /// Usernames present in the project's record, in insertion order.
    pub async fn list_users(&self, project: &str) -> Result<Vec<String>, CoreError> {
        let record = self.load_or_empty(project).await?;
        Ok(record.keys().cloned().collect())
    }

    /// Size of a user's favorite set; 0 for unknown users.
    pub async fn count(&self, project: &str, username: &str) -> Result<usize, CoreError> {
        let record = self.load_or_empty(project).await?;
        Ok(record.get(username).map(Vec::len).unwrap_or(0))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
