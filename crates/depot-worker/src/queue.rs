//! Job queue for enqueuing derivative work and inspecting its progress.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Notify;
use tracing::{debug, info};

use depot_core::result::AppResult;
use depot_core::traits::scheduler::DerivativeScheduler;
use depot_core::types::{FileId, JobId, UserId};
use depot_database::JobRepository;
use depot_entity::job::{CreateJob, DerivativeJob, JobFailure, JobStatus, ThumbnailPayload};

use crate::jobs::thumbnail::THUMBNAIL_JOB;

/// Durable FIFO queue backed by the `jobs` table.
///
/// Enqueuing wakes one idle worker; workers also poll, so a lost wake-up
/// only delays a job.
#[derive(Debug, Clone)]
pub struct JobQueue {
    repo: JobRepository,
    notify: Arc<Notify>,
}

impl JobQueue {
    /// Create a new job queue.
    pub fn new(repo: JobRepository) -> Self {
        Self {
            repo,
            notify: Arc::new(Notify::new()),
        }
    }

    /// Append a job with an arbitrary payload.
    pub async fn enqueue_raw(&self, job_type: &str, payload: Value) -> AppResult<DerivativeJob> {
        let job = self
            .repo
            .create(&CreateJob {
                job_type: job_type.to_string(),
                payload,
            })
            .await?;
        self.notify.notify_one();
        debug!(job_id = %job.id, job_type, "Enqueued job");
        Ok(job)
    }

    /// Claim the oldest queued job.
    pub async fn dequeue(&self) -> AppResult<Option<DerivativeJob>> {
        self.repo.claim_next().await
    }

    /// Look up a job.
    pub async fn get(&self, id: JobId) -> AppResult<Option<DerivativeJob>> {
        self.repo.find_by_id(id).await
    }

    /// Mark a job as completed.
    pub async fn complete(&self, id: JobId) -> AppResult<()> {
        self.repo.mark_completed(id).await
    }

    /// Mark a job as failed.
    pub async fn fail(&self, id: JobId, failure: &JobFailure) -> AppResult<()> {
        self.repo.mark_failed(id, failure).await
    }

    /// Redeliver a finished job. Returns `false` if the job is unknown or
    /// not yet finished.
    pub async fn requeue(&self, id: JobId) -> AppResult<bool> {
        let requeued = self.repo.requeue(id).await?;
        if requeued {
            self.notify.notify_one();
            info!(job_id = %id, "Job requeued");
        }
        Ok(requeued)
    }

    /// Return jobs left in `processing` by a previous run to the queue.
    pub async fn recover_interrupted(&self) -> AppResult<u64> {
        let recovered = self.repo.requeue_interrupted().await?;
        if recovered > 0 {
            info!(recovered, "Recovered interrupted jobs");
            self.notify.notify_one();
        }
        Ok(recovered)
    }

    /// Number of jobs in `status`.
    pub async fn count(&self, status: JobStatus) -> AppResult<u64> {
        self.repo.count_by_status(status).await
    }

    /// Wake-up signal for idle workers.
    pub fn notifier(&self) -> Arc<Notify> {
        Arc::clone(&self.notify)
    }
}

#[async_trait]
impl DerivativeScheduler for JobQueue {
    async fn schedule(&self, file_id: FileId, owner_id: UserId) -> AppResult<JobId> {
        let payload = serde_json::to_value(ThumbnailPayload::new(file_id, owner_id))?;
        let job = self.enqueue_raw(THUMBNAIL_JOB, payload).await?;
        Ok(job.id)
    }
}
