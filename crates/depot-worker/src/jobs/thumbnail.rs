//! Image derivative generation job handler.

use async_trait::async_trait;
use tracing::info;

use depot_database::FileRepository;
use depot_entity::job::{DerivativeJob, JobFailure, ThumbnailPayload};
use depot_storage::ThumbnailGenerator;

use crate::executor::{JobExecutionError, JobHandler};

/// Job type of derivative generation jobs.
pub const THUMBNAIL_JOB: &str = "thumbnail";

/// Produces the resized copies of one uploaded image.
#[derive(Debug)]
pub struct ThumbnailJobHandler {
    files: FileRepository,
    generator: ThumbnailGenerator,
}

impl ThumbnailJobHandler {
    /// Create a new thumbnail job handler.
    pub fn new(files: FileRepository, generator: ThumbnailGenerator) -> Self {
        Self { files, generator }
    }
}

#[async_trait]
impl JobHandler for ThumbnailJobHandler {
    fn job_type(&self) -> &str {
        THUMBNAIL_JOB
    }

    async fn execute(&self, job: &DerivativeJob) -> Result<(), JobExecutionError> {
        let (file_id, user_id) = ThumbnailPayload::from_json(&job.payload)?;

        // The payload may be stale or forged: the node must still exist
        // under the same owner.
        let node = self
            .files
            .find_owned(file_id, user_id)
            .await?
            .ok_or(JobFailure::FileNotFound)?;
        let source = node.local_path.ok_or(JobFailure::FileNotFound)?;

        let written = self
            .generator
            .generate_all(&source)
            .await
            .map_err(|e| JobFailure::GenerationError(e.to_string()))?;

        info!(
            job_id = %job.id,
            file_id = %file_id,
            derivatives = written.len(),
            "Derivatives generated"
        );
        Ok(())
    }
}
