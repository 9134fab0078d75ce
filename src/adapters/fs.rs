//! Filesystem artifact store

use crate::adapters::backend::traits::ArtifactStore;
use crate::domain::errors::{ReportError, StorageError};
use crate::domain::Result;
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

/// Artifact store rooted at a directory on the local filesystem
///
/// Store-relative paths map directly to paths under the root; parent
/// directories are created on write. Relative paths must not escape the
/// root, so absolute paths and `..` components are rejected.
pub struct FsArtifactStore {
    root: PathBuf,
}

impl FsArtifactStore {
    /// Store rooted at `root`; the directory is created lazily on first write
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the store
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        let escapes = relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)));
        if escapes {
            return Err(ReportError::Validation(format!(
                "Artifact path escapes the store root: {path}"
            )));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ArtifactStore for FsArtifactStore {
    async fn write(&self, path: &str, bytes: &[u8]) -> Result<()> {
        let full_path = self.resolve(path)?;

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::WriteFailed {
                    path: path.to_string(),
                    message: format!("creating directories: {e}"),
                }
            })?;
        }

        tokio::fs::write(&full_path, bytes)
            .await
            .map_err(|e| StorageError::WriteFailed {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!(path = %full_path.display(), bytes = bytes.len(), "Wrote artifact");
        Ok(())
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.resolve(path)?;

        match tokio::fs::read(&full_path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::ArtifactMissing(path.to_string()).into())
            }
            Err(e) => Err(StorageError::ReadFailed {
                path: path.to_string(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let full_path = self.resolve(path)?;

        match tokio::fs::remove_file(&full_path).await {
            Ok(()) => Ok(()),
            // Already gone; the report record is the source of truth
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::DeleteFailed {
                path: path.to_string(),
                message: e.to_string(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_read_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = FsArtifactStore::new(dir.path());

        store
            .write("reports/patients/2025/03/01/a.csv", b"id\n1\n")
            .await
            .unwrap();
        let bytes = store.read("reports/patients/2025/03/01/a.csv").await.unwrap();
        assert_eq!(bytes, b"id\n1\n");

        assert!(dir
            .path()
            .join("reports/patients/2025/03/01/a.csv")
            .exists());
    }

    #[tokio::test]
    async fn test_read_missing_is_artifact_missing() {
        let dir = TempDir::new().unwrap();
        let store = FsArtifactStore::new(dir.path());

        let err = store.read("reports/nope.pdf").await.unwrap_err();
        assert!(matches!(
            err,
            ReportError::Storage(StorageError::ArtifactMissing(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = FsArtifactStore::new(dir.path());

        store.write("reports/a.txt", b"x").await.unwrap();
        store.delete("reports/a.txt").await.unwrap();
        store.delete("reports/a.txt").await.unwrap();
        assert!(!dir.path().join("reports/a.txt").exists());
    }

    #[tokio::test]
    async fn test_traversal_rejected() {
        let dir = TempDir::new().unwrap();
        let store = FsArtifactStore::new(dir.path());

        let err = store.write("../outside.txt", b"x").await.unwrap_err();
        assert!(matches!(err, ReportError::Validation(_)));

        let err = store.read("/etc/passwd").await.unwrap_err();
        assert!(matches!(err, ReportError::Validation(_)));
    }
}
