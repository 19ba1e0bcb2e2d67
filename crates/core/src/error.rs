use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The configured media root cannot be read (moved, deleted, or
    /// permission denied). Browsing callers degrade this to an empty
    /// catalog rather than failing the request.
    #[error("Media root unavailable: {path}: {source}")]
    RootUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A favorites record file exists but is not valid JSON. The documented
    /// policy is to log and continue with an empty record.
    #[error("Corrupt favorites record for project '{project}': {source}")]
    CorruptRecord {
        project: String,
        source: serde_json::Error,
    },

    /// A media path resolved outside the configured root. Hard deny.
    #[error("Path traversal denied: {0}")]
    PathTraversalDenied(String),

    /// A requested media file is missing or not an allow-listed media file.
    #[error("Media not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
