//! Queue, repositories, and storage over throwaway directories.

use std::io::Cursor;
use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use serde_json::Value;
use tempfile::TempDir;

use depot_core::config::database::DatabaseConfig;
use depot_core::config::worker::WorkerConfig;
use depot_core::traits::storage::StorageProvider;
use depot_core::types::{FileId, JobId, ParentRef, UserId};
use depot_database::{DatabasePool, FileRepository, JobRepository};
use depot_entity::file::{CreateFileNode, FileNode, FileType};
use depot_entity::job::{DerivativeJob, JobStatus};
use depot_storage::{LocalStorageProvider, ThumbnailGenerator};

use crate::{JobExecutor, JobQueue, ThumbnailJobHandler, WorkerRunner};

pub fn job(job_type: &str) -> DerivativeJob {
    DerivativeJob {
        id: JobId::new(),
        job_type: job_type.to_string(),
        payload: Value::Null,
        status: JobStatus::Processing,
        failure_reason: None,
        error_message: None,
        attempts: 1,
        created_at: Utc::now(),
        started_at: Some(Utc::now()),
        finished_at: None,
    }
}

pub fn job_with_payload(payload: Value) -> DerivativeJob {
    DerivativeJob {
        payload,
        ..job("thumbnail")
    }
}

pub fn png(width: u32, height: u32) -> Bytes {
    let buf = ImageBuffer::from_pixel(width, height, Rgb([20u8, 120, 220]));
    let mut out = Vec::new();
    DynamicImage::ImageRgb8(buf)
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .expect("encode");
    Bytes::from(out)
}

pub struct Fixture {
    pub queue: JobQueue,
    pub files: FileRepository,
    pub storage: Arc<LocalStorageProvider>,
    _dirs: (TempDir, TempDir),
}

impl Fixture {
    pub async fn new() -> Self {
        let db_dir = tempfile::tempdir().expect("tempdir");
        let files_dir = tempfile::tempdir().expect("tempdir");
        let db = DatabasePool::connect(&DatabaseConfig {
            url: format!("sqlite://{}", db_dir.path().join("jobs.db").display()),
            ..DatabaseConfig::default()
        })
        .await
        .expect("connect");
        depot_database::migration::run_migrations(&db)
            .await
            .expect("migrate");
        let storage = Arc::new(
            LocalStorageProvider::new(&files_dir.path().display().to_string())
                .await
                .expect("storage"),
        );

        Self {
            queue: JobQueue::new(JobRepository::new(db.clone())),
            files: FileRepository::new(db),
            storage,
            _dirs: (db_dir, files_dir),
        }
    }

    pub async fn node(&self, owner: UserId, file_type: FileType, data: Bytes) -> FileNode {
        let key = FileId::new().to_string();
        self.storage.write(&key, data).await.expect("write");
        self.files
            .create(&CreateFileNode {
                id: FileId::new(),
                user_id: owner,
                name: "picture.png".to_string(),
                file_type,
                is_public: false,
                parent_id: ParentRef::Root,
                local_path: Some(key),
            })
            .await
            .expect("create")
    }

    pub async fn image(&self, owner: UserId, data: Bytes) -> FileNode {
        self.node(owner, FileType::Image, data).await
    }

    pub async fn read(&self, key: &str) -> Bytes {
        self.storage.read_bytes(key).await.expect("read")
    }

    pub fn handler(&self) -> ThumbnailJobHandler {
        ThumbnailJobHandler::new(
            self.files.clone(),
            ThumbnailGenerator::new(self.storage.clone(), vec![500, 250, 100]),
        )
    }

    pub fn runner(&self, concurrency: usize) -> WorkerRunner {
        let mut executor = JobExecutor::new();
        executor.register(Arc::new(self.handler()));
        WorkerRunner::new(
            self.queue.clone(),
            Arc::new(executor),
            WorkerConfig {
                concurrency,
                poll_interval_seconds: 1,
                ..WorkerConfig::default()
            },
        )
    }
}
