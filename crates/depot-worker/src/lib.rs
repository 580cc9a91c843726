//! Derivative generation in the background.
//!
//! This crate provides:
//! - A persistent FIFO job queue that also serves as the file service's
//!   [`DerivativeScheduler`](depot_core::traits::scheduler::DerivativeScheduler)
//! - A job executor that dispatches jobs to the correct handler
//! - A bounded worker pool that claims and runs queued jobs
//! - The thumbnail job handler

pub mod executor;
pub mod jobs;
pub mod queue;
pub mod runner;

pub use executor::{JobExecutionError, JobExecutor, JobHandler};
pub use jobs::ThumbnailJobHandler;
pub use queue::JobQueue;
pub use runner::WorkerRunner;

#[cfg(test)]
pub(crate) mod test_support;
