//! Safe media path resolution.
//!
//! Turns a client-supplied file name into an absolute path that is
//! guaranteed to live directly under the media root. The security boundary
//! of the file-serving endpoint: traversal is denied both lexically
//! (separators, `..`) and physically (canonicalized path must stay under
//! the canonicalized root, so symlinks cannot escape either).

use std::path::{Component, Path, PathBuf};

use crate::catalog::MediaKind;
use crate::error::CoreError;

/// Resolve `filename` under `root`, or refuse.
///
/// - `PathTraversalDenied` for anything that is not a plain file name, or
///   that resolves outside the root;
/// - `NotFound` for names outside the media allow-list, missing files, and
///   non-files.
pub async fn resolve_media_path(root: &Path, filename: &str) -> Result<PathBuf, CoreError> {
    if filename.is_empty()
        || filename.contains('/')
        || filename.contains('\\')
        || Path::new(filename)
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
    {
        return Err(CoreError::PathTraversalDenied(filename.to_string()));
    }

    if MediaKind::from_name(filename).is_none() {
        return Err(CoreError::NotFound(filename.to_string()));
    }

    let resolved_root = tokio::fs::canonicalize(root)
        .await
        .map_err(|source| CoreError::RootUnavailable {
            path: root.to_path_buf(),
            source,
        })?;

    let resolved = tokio::fs::canonicalize(resolved_root.join(filename))
        .await
        .map_err(|_| CoreError::NotFound(filename.to_string()))?;

    if !resolved.starts_with(&resolved_root) {
        return Err(CoreError::PathTraversalDenied(filename.to_string()));
    }

    let metadata = tokio::fs::metadata(&resolved)
        .await
        .map_err(|_| CoreError::NotFound(filename.to_string()))?;
    if !metadata.is_file() {
        return Err(CoreError::NotFound(filename.to_string()));
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_a_plain_media_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        tokio::fs::write(tmp.path().join("cat.png"), b"x")
            .await
            .expect("write");

        let resolved = resolve_media_path(tmp.path(), "cat.png")
            .await
            .expect("resolve");
        assert!(resolved.ends_with("cat.png"));
    }

    #[tokio::test]
    async fn rejects_dotdot_and_separators() {
        let tmp = tempfile::tempdir().expect("tempdir");

        for name in ["../etc/passwd", "..", "a/b.png", "a\\b.png", ""] {
            let err = resolve_media_path(tmp.path(), name)
                .await
                .expect_err("must deny");
            assert!(
                matches!(err, CoreError::PathTraversalDenied(_)),
                "{name:?} should be denied, got {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn rejects_non_media_extensions() {
        let tmp = tempfile::tempdir().expect("tempdir");
        tokio::fs::write(tmp.path().join("secrets.txt"), b"x")
            .await
            .expect("write");

        let err = resolve_media_path(tmp.path(), "secrets.txt")
            .await
            .expect_err("must refuse");
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let err = resolve_media_path(tmp.path(), "ghost.png")
            .await
            .expect_err("must refuse");
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn symlink_escaping_the_root_is_denied() {
        let outside = tempfile::tempdir().expect("tempdir");
        let root = tempfile::tempdir().expect("tempdir");
        tokio::fs::write(outside.path().join("target.png"), b"x")
            .await
            .expect("write");
        std::os::unix::fs::symlink(outside.path().join("target.png"), root.path().join("link.png"))
            .expect("symlink");

        let err = resolve_media_path(root.path(), "link.png")
            .await
            .expect_err("must deny");
        assert!(matches!(err, CoreError::PathTraversalDenied(_)));
    }

    #[tokio::test]
    async fn unreadable_root_is_root_unavailable() {
        let err = resolve_media_path(Path::new("/no/such/root"), "cat.png")
            .await
            .expect_err("must fail");
        assert!(matches!(err, CoreError::RootUnavailable { .. }));
    }
}
