//! Liveness of the backing stores and basic usage counts.

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use depot_core::result::AppResult;
use depot_core::traits::cache::CacheProvider;
use depot_database::DatabasePool;

use crate::file::FileService;
use crate::user::UserService;

/// Whether each backing store answered its health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    /// Session cache reachability. Named after the default backend.
    pub redis: bool,
    /// Metadata database reachability.
    pub db: bool,
}

/// Row counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    /// Registered users.
    pub users: u64,
    /// Stored nodes of every type.
    pub files: u64,
}

/// Reports on the running service.
#[derive(Debug, Clone)]
pub struct SystemService {
    cache: Arc<dyn CacheProvider>,
    db: DatabasePool,
    users: UserService,
    files: FileService,
}

impl SystemService {
    /// Creates a new system service.
    pub fn new(
        cache: Arc<dyn CacheProvider>,
        db: DatabasePool,
        users: UserService,
        files: FileService,
    ) -> Self {
        Self {
            cache,
            db,
            users,
            files,
        }
    }

    /// Probe both stores. A failing probe reports `false`; it never errors.
    pub async fn status(&self) -> StatusReport {
        let (cache, db) = tokio::join!(self.cache.health_check(), self.db.health_check());
        StatusReport {
            redis: probe("cache", cache),
            db: probe("database", db),
        }
    }

    /// Count users and nodes.
    pub async fn stats(&self) -> AppResult<StatsReport> {
        let (users, files) = tokio::try_join!(self.users.count(), self.files.count())?;
        Ok(StatsReport { users, files })
    }
}

fn probe(store: &str, result: AppResult<bool>) -> bool {
    match result {
        Ok(alive) => alive,
        Err(e) => {
            warn!(store, error = %e, "Health probe failed");
            false
        }
    }
}
