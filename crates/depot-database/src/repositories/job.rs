//! Job repository implementation: the persistent derivative queue.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use depot_core::error::{AppError, ErrorKind};
use depot_core::result::AppResult;
use depot_core::types::JobId;
use depot_entity::job::{CreateJob, DerivativeJob, JobFailure, JobStatus};

use crate::connection::{DatabasePool, db_error};

const COLUMNS: &str = "id, job_type, payload, status, failure_reason, error_message, attempts, \
                       created_at, started_at, finished_at";

#[derive(Debug, FromRow)]
struct JobRow {
    id: String,
    job_type: String,
    payload: String,
    status: String,
    failure_reason: Option<String>,
    error_message: Option<String>,
    attempts: i64,
    created_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl TryFrom<JobRow> for DerivativeJob {
    type Error = AppError;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        let id = row
            .id
            .parse()
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Corrupt job id", e))?;
        let status = row
            .status
            .parse::<JobStatus>()
            .map_err(AppError::database)?;
        Ok(Self {
            id,
            job_type: row.job_type,
            payload: serde_json::from_str(&row.payload)?,
            status,
            failure_reason: row.failure_reason,
            error_message: row.error_message,
            attempts: row.attempts,
            created_at: row.created_at,
            started_at: row.started_at,
            finished_at: row.finished_at,
        })
    }
}

/// Repository for the job queue.
#[derive(Debug, Clone)]
pub struct JobRepository {
    db: DatabasePool,
}

impl JobRepository {
    /// Create a new job repository.
    pub fn new(db: DatabasePool) -> Self {
        Self { db }
    }

    /// Find a job by ID.
    pub async fn find_by_id(&self, id: JobId) -> AppResult<Option<DerivativeJob>> {
        let sql = format!("SELECT {COLUMNS} FROM jobs WHERE id = ?");
        let row = self
            .db
            .run(async {
                sqlx::query_as::<_, JobRow>(&sql)
                    .bind(id.to_string())
                    .fetch_optional(self.db.pool())
                    .await
                    .map_err(db_error("Failed to find job"))
            })
            .await?;
        row.map(DerivativeJob::try_from).transpose()
    }

    /// Append a queued job.
    pub async fn create(&self, data: &CreateJob) -> AppResult<DerivativeJob> {
        let sql = format!(
            "INSERT INTO jobs (id, job_type, payload, status, created_at) \
             VALUES (?, ?, ?, 'queued', ?) RETURNING {COLUMNS}"
        );
        let payload = serde_json::to_string(&data.payload)?;
        let row = self
            .db
            .run(async {
                sqlx::query_as::<_, JobRow>(&sql)
                    .bind(JobId::new().to_string())
                    .bind(&data.job_type)
                    .bind(&payload)
                    .bind(Utc::now())
                    .fetch_one(self.db.pool())
                    .await
                    .map_err(db_error("Failed to create job"))
            })
            .await?;
        DerivativeJob::try_from(row)
    }

    /// Atomically claim the oldest queued job, moving it to `processing`.
    pub async fn claim_next(&self) -> AppResult<Option<DerivativeJob>> {
        let sql = format!(
            "UPDATE jobs SET status = 'processing', attempts = attempts + 1, started_at = ? \
             WHERE seq = (SELECT seq FROM jobs WHERE status = 'queued' ORDER BY seq ASC LIMIT 1) \
             RETURNING {COLUMNS}"
        );
        let row = self
            .db
            .run(async {
                sqlx::query_as::<_, JobRow>(&sql)
                    .bind(Utc::now())
                    .fetch_optional(self.db.pool())
                    .await
                    .map_err(db_error("Failed to claim job"))
            })
            .await?;
        row.map(DerivativeJob::try_from).transpose()
    }

    /// Mark a job as completed.
    pub async fn mark_completed(&self, id: JobId) -> AppResult<()> {
        self.db
            .run(async {
                sqlx::query(
                    "UPDATE jobs SET status = 'completed', failure_reason = NULL, \
                     error_message = NULL, finished_at = ? WHERE id = ?",
                )
                .bind(Utc::now())
                .bind(id.to_string())
                .execute(self.db.pool())
                .await
                .map_err(db_error("Failed to complete job"))
            })
            .await?;
        Ok(())
    }

    /// Mark a job as failed with a classified reason.
    pub async fn mark_failed(&self, id: JobId, failure: &JobFailure) -> AppResult<()> {
        self.db
            .run(async {
                sqlx::query(
                    "UPDATE jobs SET status = 'failed', failure_reason = ?, error_message = ?, \
                     finished_at = ? WHERE id = ?",
                )
                .bind(failure.code())
                .bind(failure.to_string())
                .bind(Utc::now())
                .bind(id.to_string())
                .execute(self.db.pool())
                .await
                .map_err(db_error("Failed to fail job"))
            })
            .await?;
        Ok(())
    }

    /// Put a finished job back on the queue. Returns `false` if the job is
    /// unknown or still queued or processing.
    pub async fn requeue(&self, id: JobId) -> AppResult<bool> {
        let result = self
            .db
            .run(async {
                sqlx::query(
                    "UPDATE jobs SET status = 'queued', finished_at = NULL \
                     WHERE id = ? AND status IN ('completed', 'failed')",
                )
                .bind(id.to_string())
                .execute(self.db.pool())
                .await
                .map_err(db_error("Failed to requeue job"))
            })
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Return every `processing` job to `queued`. Used at worker start-up,
    /// when nothing can legitimately still be processing.
    pub async fn requeue_interrupted(&self) -> AppResult<u64> {
        let result = self
            .db
            .run(async {
                sqlx::query("UPDATE jobs SET status = 'queued' WHERE status = 'processing'")
                    .execute(self.db.pool())
                    .await
                    .map_err(db_error("Failed to requeue interrupted jobs"))
            })
            .await?;
        Ok(result.rows_affected())
    }

    /// Count jobs in the given status.
    pub async fn count_by_status(&self, status: JobStatus) -> AppResult<u64> {
        let total: i64 = self
            .db
            .run(async {
                sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE status = ?")
                    .bind(status.as_str())
                    .fetch_one(self.db.pool())
                    .await
                    .map_err(db_error("Failed to count jobs"))
            })
            .await?;
        Ok(total as u64)
    }
}
