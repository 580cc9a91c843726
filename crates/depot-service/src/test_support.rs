//! Fully wired services over throwaway stores.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;

use depot_auth::{AccessController, SessionStore};
use depot_cache::memory::MemoryCacheProvider;
use depot_core::config::cache::MemoryCacheConfig;
use depot_core::config::database::DatabaseConfig;
use depot_core::error::AppError;
use depot_core::result::AppResult;
use depot_core::traits::scheduler::DerivativeScheduler;
use depot_core::types::{FileId, JobId, UserId};
use depot_database::{DatabasePool, FileRepository, UserRepository};
use depot_storage::LocalStorageProvider;

use crate::{AuthService, FileService, RequestContext, SystemService, UserService};

/// Scheduler that remembers what it was asked to do.
#[derive(Debug, Default)]
pub struct RecordingScheduler {
    calls: Mutex<Vec<(FileId, UserId)>>,
    fail_next: Mutex<bool>,
}

impl RecordingScheduler {
    pub fn scheduled(&self) -> Vec<(FileId, UserId)> {
        self.calls.lock().expect("lock").clone()
    }

    pub fn fail_next(&self) {
        *self.fail_next.lock().expect("lock") = true;
    }
}

#[async_trait]
impl DerivativeScheduler for RecordingScheduler {
    async fn schedule(&self, file_id: FileId, owner_id: UserId) -> AppResult<JobId> {
        let mut fail = self.fail_next.lock().expect("lock");
        if *fail {
            *fail = false;
            return Err(AppError::store_unavailable("queue offline"));
        }
        self.calls.lock().expect("lock").push((file_id, owner_id));
        Ok(JobId::new())
    }
}

pub struct Harness {
    pub db: DatabasePool,
    pub users: UserService,
    pub auth: AuthService,
    pub access: AccessController,
    pub files: FileService,
    pub system: SystemService,
    pub scheduler: Arc<RecordingScheduler>,
    _dirs: (TempDir, TempDir),
}

impl Harness {
    pub async fn new() -> Self {
        let db_dir = tempfile::tempdir().expect("tempdir");
        let files_dir = tempfile::tempdir().expect("tempdir");

        let db = DatabasePool::connect(&DatabaseConfig {
            url: format!("sqlite://{}", db_dir.path().join("test.db").display()),
            ..DatabaseConfig::default()
        })
        .await
        .expect("connect");
        depot_database::migration::run_migrations(&db)
            .await
            .expect("migrate");

        let cache = Arc::new(MemoryCacheProvider::new(&MemoryCacheConfig::default()));
        let storage = Arc::new(
            LocalStorageProvider::new(&files_dir.path().display().to_string())
                .await
                .expect("storage"),
        );
        let scheduler = Arc::new(RecordingScheduler::default());

        let user_repo = UserRepository::new(db.clone());
        let access = AccessController::new(
            SessionStore::new(cache.clone(), Duration::from_secs(60)),
            user_repo.clone(),
        );
        let users = UserService::new(user_repo);
        let auth = AuthService::new(users.clone(), access.clone());
        let files = FileService::new(
            FileRepository::new(db.clone()),
            storage,
            scheduler.clone(),
        );
        let system = SystemService::new(cache, db.clone(), users.clone(), files.clone());

        Self {
            db,
            users,
            auth,
            access,
            files,
            system,
            scheduler,
            _dirs: (db_dir, files_dir),
        }
    }

    /// Register `email` and return a context acting as that user.
    pub async fn user(&self, email: &str) -> RequestContext {
        self.users
            .register(Some(email), Some("pw"))
            .await
            .expect("register");
        let user = self
            .users
            .verify_credentials(email, "pw")
            .await
            .expect("verify");
        RequestContext::new(&user)
    }
}
