//! Cache manager that dispatches to the configured provider.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use depot_core::config::cache::CacheConfig;
use depot_core::error::AppError;
use depot_core::result::AppResult;
use depot_core::timeout::bounded;
use depot_core::traits::cache::CacheProvider;

/// Cache manager that wraps the configured cache provider and bounds every
/// call by the configured operation timeout.
#[derive(Debug, Clone)]
pub struct CacheManager {
    inner: Arc<dyn CacheProvider>,
    operation_timeout: Duration,
}

impl CacheManager {
    /// Create a new cache manager from configuration.
    pub async fn new(config: &CacheConfig) -> AppResult<Self> {
        let inner: Arc<dyn CacheProvider> = match config.provider.as_str() {
            #[cfg(feature = "redis-backend")]
            "redis" => {
                info!("Initializing Redis cache provider");
                let client = crate::redis::RedisClient::connect(&config.redis).await?;
                Arc::new(crate::redis::RedisCacheProvider::new(client))
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory cache provider");
                Arc::new(crate::memory::MemoryCacheProvider::new(&config.memory))
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown cache provider: '{other}'. Supported: memory, redis"
                )));
            }
        };

        Ok(Self {
            inner,
            operation_timeout: Duration::from_millis(config.operation_timeout_ms),
        })
    }

    /// Create a cache manager from an existing provider (for testing).
    pub fn from_provider(provider: Arc<dyn CacheProvider>, operation_timeout: Duration) -> Self {
        Self {
            inner: provider,
            operation_timeout,
        }
    }
}

#[async_trait]
impl CacheProvider for CacheManager {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        bounded(self.operation_timeout, "cache", self.inner.get(key)).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        bounded(self.operation_timeout, "cache", self.inner.set(key, value, ttl)).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        bounded(self.operation_timeout, "cache", self.inner.delete(key)).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        bounded(self.operation_timeout, "cache", self.inner.exists(key)).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        bounded(self.operation_timeout, "cache", self.inner.health_check()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_core::error::ErrorKind;

    #[derive(Debug)]
    struct Stalled;

    #[async_trait]
    impl CacheProvider for Stalled {
        async fn get(&self, _key: &str) -> AppResult<Option<String>> {
            std::future::pending().await
        }
        async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> AppResult<()> {
            std::future::pending().await
        }
        async fn delete(&self, _key: &str) -> AppResult<()> {
            std::future::pending().await
        }
        async fn exists(&self, _key: &str) -> AppResult<bool> {
            std::future::pending().await
        }
        async fn health_check(&self) -> AppResult<bool> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_unknown_provider_rejected() {
        let config = CacheConfig {
            provider: "memcached".to_string(),
            ..CacheConfig::default()
        };
        let err = CacheManager::new(&config).await.expect_err("unknown");
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_backend_is_unavailable() {
        let cache = CacheManager::from_provider(Arc::new(Stalled), Duration::from_millis(100));
        let err = cache.get("auth_x").await.expect_err("stalled");
        assert_eq!(err.kind, ErrorKind::StoreUnavailable);
    }

    #[tokio::test]
    async fn test_memory_round_trip() {
        let cache = CacheManager::new(&CacheConfig::default()).await.expect("memory");
        cache
            .set("k", "v", Duration::from_secs(5))
            .await
            .expect("set");
        assert_eq!(cache.get("k").await.expect("get").as_deref(), Some("v"));
    }
}
