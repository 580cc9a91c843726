//! Derivative generation job entities.

pub mod model;
pub mod payload;
pub mod status;

pub use model::{CreateJob, DerivativeJob};
pub use payload::ThumbnailPayload;
pub use status::{JobFailure, JobStatus};
