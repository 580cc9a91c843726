//! Derivative job entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use depot_core::types::JobId;

use super::status::JobStatus;

/// A queued or finished derivative generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivativeJob {
    /// Unique job identifier.
    pub id: JobId,
    /// Handler name, e.g. `"thumbnail"`.
    pub job_type: String,
    /// Raw payload as enqueued.
    pub payload: serde_json::Value,
    /// Current job status.
    pub status: JobStatus,
    /// Failure code when `status` is `Failed`.
    pub failure_reason: Option<String>,
    /// Human-readable failure detail.
    pub error_message: Option<String>,
    /// Number of times a worker claimed this job.
    pub attempts: i64,
    /// When the job was enqueued.
    pub created_at: DateTime<Utc>,
    /// When a worker last claimed the job.
    pub started_at: Option<DateTime<Utc>>,
    /// When the job reached a terminal state.
    pub finished_at: Option<DateTime<Utc>>,
}

/// Data required to enqueue a job.
#[derive(Debug, Clone)]
pub struct CreateJob {
    /// Handler name.
    pub job_type: String,
    /// Payload handed to the handler.
    pub payload: serde_json::Value,
}
