//! Session tokens kept in the expiring cache.
//!
//! A session is a single cache entry `auth_<token>` whose value is the user
//! id. Its lifetime is fixed at creation; reads never extend it.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use uuid::Uuid;

use depot_cache::keys;
use depot_core::result::AppResult;
use depot_core::traits::cache::CacheProvider;
use depot_core::types::UserId;

/// Issues, resolves, and revokes session tokens.
#[derive(Debug, Clone)]
pub struct SessionStore {
    cache: Arc<dyn CacheProvider>,
    ttl: Duration,
}

impl SessionStore {
    /// Creates a new session store whose tokens live for `ttl`.
    pub fn new(cache: Arc<dyn CacheProvider>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    /// Issues a fresh random token bound to `user_id`.
    ///
    /// Tokens carry 122 random bits and are never reused; any number of
    /// sessions may exist per user.
    pub async fn create_session(&self, user_id: UserId) -> AppResult<String> {
        let token = Uuid::new_v4().to_string();
        self.cache
            .set(&keys::session(&token), &user_id.to_string(), self.ttl)
            .await?;
        debug!(user_id = %user_id, ttl_secs = self.ttl.as_secs(), "Session created");
        Ok(token)
    }

    /// Resolves a token to its user id. Unknown, expired, and empty tokens
    /// resolve to `None`.
    pub async fn resolve_session(&self, token: &str) -> AppResult<Option<UserId>> {
        if token.is_empty() {
            return Ok(None);
        }
        let Some(raw) = self.cache.get(&keys::session(token)).await? else {
            return Ok(None);
        };
        match UserId::parse_lenient(&raw) {
            Some(user_id) => Ok(Some(user_id)),
            None => {
                warn!("Session entry holds a malformed user id; treating as absent");
                Ok(None)
            }
        }
    }

    /// Revokes a token. Revoking an unknown token is not an error.
    pub async fn destroy_session(&self, token: &str) -> AppResult<()> {
        if token.is_empty() {
            return Ok(());
        }
        self.cache.delete(&keys::session(token)).await
    }
}
