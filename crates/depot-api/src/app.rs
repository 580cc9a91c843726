//! Application builder: wires stores, services, and the worker into an
//! Axum app.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_middleware;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use depot_auth::{AccessController, SessionStore};
use depot_cache::CacheManager;
use depot_core::config::AppConfig;
use depot_core::result::AppResult;
use depot_core::traits::cache::CacheProvider;
use depot_core::traits::storage::StorageProvider;
use depot_database::migration::run_migrations;
use depot_database::{DatabasePool, FileRepository, JobRepository, UserRepository};
use depot_service::{AuthService, FileService, SystemService, UserService};
use depot_storage::{StorageManager, ThumbnailGenerator};
use depot_worker::{JobExecutor, JobQueue, ThumbnailJobHandler, WorkerRunner};

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let server = state.config.server.clone();

    build_router(state)
        .layer(DefaultBodyLimit::max(server.max_body_bytes))
        .layer(RequestBodyLimitLayer::new(server.max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            server.request_timeout_seconds,
        )))
        .layer(build_cors_layer(&server))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(request_logging))
}

/// Every long-lived component of a running Depot instance.
#[derive(Debug)]
pub struct Depot {
    /// Handler state.
    pub state: AppState,
    /// Metadata database.
    pub db: DatabasePool,
    /// Derivative job queue.
    pub queue: JobQueue,
    /// Worker pool consuming `queue`.
    pub runner: WorkerRunner,
}

impl Depot {
    /// Connect the stores and build every service.
    pub async fn assemble(config: AppConfig) -> AppResult<Self> {
        info!("Connecting to database");
        let db = DatabasePool::connect(&config.database).await?;
        run_migrations(&db).await?;

        info!(provider = %config.cache.provider, "Initializing cache");
        let cache: Arc<dyn CacheProvider> = Arc::new(CacheManager::new(&config.cache).await?);

        info!(root = %config.storage.root_path, "Initializing storage");
        let storage: Arc<dyn StorageProvider> =
            Arc::new(StorageManager::new(&config.storage).await?);

        let user_repo = UserRepository::new(db.clone());
        let file_repo = FileRepository::new(db.clone());
        let queue = JobQueue::new(JobRepository::new(db.clone()));

        let access = AccessController::new(
            SessionStore::new(Arc::clone(&cache), config.session.ttl()),
            user_repo.clone(),
        );
        let users = UserService::new(user_repo);
        let auth = AuthService::new(users.clone(), access.clone());
        let files = FileService::new(
            file_repo.clone(),
            Arc::clone(&storage),
            Arc::new(queue.clone()),
        );
        let system = SystemService::new(cache, db.clone(), users.clone(), files.clone());

        let mut executor = JobExecutor::new();
        executor.register(Arc::new(ThumbnailJobHandler::new(
            file_repo,
            ThumbnailGenerator::new(storage, config.storage.derivative_widths.clone()),
        )));
        let runner = WorkerRunner::new(queue.clone(), Arc::new(executor), config.worker.clone());

        let state = AppState {
            config: Arc::new(config),
            access,
            users,
            auth,
            files,
            system,
        };

        Ok(Self {
            state,
            db,
            queue,
            runner,
        })
    }
}
