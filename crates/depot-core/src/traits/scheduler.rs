//! Hand-off point between file creation and derivative generation.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::{FileId, JobId, UserId};

/// Accepts derivative-generation requests for newly created images.
///
/// Implementations must return once the request is durably recorded and
/// must never wait for the work itself.
#[async_trait]
pub trait DerivativeScheduler: Send + Sync + std::fmt::Debug + 'static {
    /// Record a request to generate derivatives for `file_id` owned by `owner_id`.
    async fn schedule(&self, file_id: FileId, owner_id: UserId) -> AppResult<JobId>;
}
