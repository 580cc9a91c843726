//! Storage manager that bounds every call on the configured provider.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::info;

use depot_core::config::storage::StorageConfig;
use depot_core::result::AppResult;
use depot_core::timeout::bounded;
use depot_core::traits::storage::StorageProvider;

/// Wraps a storage provider so a stalled backend surfaces as
/// `StoreUnavailable` after the configured operation timeout.
#[derive(Debug, Clone)]
pub struct StorageManager {
    inner: Arc<dyn StorageProvider>,
    operation_timeout: Duration,
}

impl StorageManager {
    /// Open the local provider rooted at `config.root_path`.
    #[cfg(feature = "local")]
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        info!(root = %config.root_path, "Initializing local storage provider");
        let provider = crate::LocalStorageProvider::new(&config.root_path).await?;
        Ok(Self::from_provider(
            Arc::new(provider),
            Duration::from_millis(config.operation_timeout_ms),
        ))
    }

    /// Wrap an existing provider.
    pub fn from_provider(provider: Arc<dyn StorageProvider>, operation_timeout: Duration) -> Self {
        Self {
            inner: provider,
            operation_timeout,
        }
    }
}

#[async_trait]
impl StorageProvider for StorageManager {
    fn provider_type(&self) -> &str {
        self.inner.provider_type()
    }

    async fn health_check(&self) -> AppResult<bool> {
        bounded(self.operation_timeout, "storage", self.inner.health_check()).await
    }

    async fn read_bytes(&self, path: &str) -> AppResult<Bytes> {
        bounded(self.operation_timeout, "storage", self.inner.read_bytes(path)).await
    }

    async fn write(&self, path: &str, data: Bytes) -> AppResult<()> {
        bounded(self.operation_timeout, "storage", self.inner.write(path, data)).await
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        bounded(self.operation_timeout, "storage", self.inner.delete(path)).await
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        bounded(self.operation_timeout, "storage", self.inner.exists(path)).await
    }
}
