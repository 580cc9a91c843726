//! Local filesystem storage provider.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use depot_core::error::{AppError, ErrorKind};
use depot_core::result::AppResult;
use depot_core::traits::storage::StorageProvider;

/// Local filesystem storage provider.
///
/// Keys are relative paths under `root`. Writes go through a temporary
/// sibling and a rename, so a reader never observes a half-written file.
#[derive(Debug, Clone)]
pub struct LocalStorageProvider {
    root: PathBuf,
}

impl LocalStorageProvider {
    /// Create a new local storage provider rooted at the given path.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Root directory of this provider.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a relative key to a path within the root. Keys that would
    /// escape the root resolve to nothing.
    fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let clean = Path::new(path.trim_start_matches('/'));
        let escapes = clean
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if clean.as_os_str().is_empty() || escapes {
            return Err(AppError::not_found(format!("Invalid storage key: {path}")));
        }
        Ok(self.root.join(clean))
    }

    /// Ensure the parent directory of a path exists.
    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }

    async fn read_bytes(&self, path: &str) -> AppResult<Bytes> {
        let full_path = self.resolve(path)?;
        let data = fs::read(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("File not found: {path}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read file: {path}"),
                    e,
                )
            }
        })?;
        Ok(Bytes::from(data))
    }

    async fn write(&self, path: &str, data: Bytes) -> AppResult<()> {
        let full_path = self.resolve(path)?;
        self.ensure_parent(&full_path).await?;

        let mut tmp_name = full_path.clone().into_os_string();
        tmp_name.push(format!(".tmp-{}", uuid::Uuid::new_v4().simple()));
        let tmp_path = PathBuf::from(tmp_name);

        if let Err(e) = fs::write(&tmp_path, &data).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write file: {path}"),
                e,
            ));
        }
        fs::rename(&tmp_path, &full_path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to move file into place: {path}"),
                e,
            )
        })?;

        debug!(path, bytes = data.len(), "Wrote file");
        Ok(())
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        let full_path = self.resolve(path)?;
        match fs::remove_file(&full_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete file: {path}"),
                e,
            )),
        }
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        let full_path = self.resolve(path)?;
        Ok(fs::try_exists(&full_path).await.unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempfile::tempdir().expect("tempdir");
        let provider = LocalStorageProvider::new(&dir.path().display().to_string())
            .await
            .expect("provider");
        provider
            .write("abc", Bytes::from_static(b"hi"))
            .await
            .expect("write");
        assert_eq!(provider.read_bytes("abc").await.expect("read").as_ref(), b"hi");
        assert!(provider.exists("abc").await.expect("exists"));

        // Only the final file remains; the temporary sibling was renamed away.
        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .expect("ls")
            .filter_map(Result::ok)
            .collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let provider = LocalStorageProvider::new(&dir.path().display().to_string())
            .await
            .expect("provider");
        let err = provider.read_bytes("nope_100").await.expect_err("missing");
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_escaping_keys_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let provider = LocalStorageProvider::new(&dir.path().display().to_string())
            .await
            .expect("provider");
        let err = provider.read_bytes("../etc/passwd").await.expect_err("escape");
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(
            provider
                .write("", Bytes::from_static(b"x"))
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_overwrite_and_delete() {
        let dir = tempfile::tempdir().expect("tempdir");
        let provider = LocalStorageProvider::new(&dir.path().display().to_string())
            .await
            .expect("provider");
        provider.write("k", Bytes::from_static(b"one")).await.expect("write");
        provider.write("k", Bytes::from_static(b"two")).await.expect("write");
        assert_eq!(provider.read_bytes("k").await.expect("read").as_ref(), b"two");
        provider.delete("k").await.expect("delete");
        provider.delete("k").await.expect("delete again");
        assert!(!provider.exists("k").await.expect("exists"));
    }
}
