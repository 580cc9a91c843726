//! Worker runner: main loop that claims queued jobs and executes them.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, watch};
use tracing::{error, info, trace, warn};

use depot_core::config::worker::WorkerConfig;
use depot_core::result::AppResult;
use depot_entity::job::{DerivativeJob, JobFailure};

use crate::executor::JobExecutor;
use crate::queue::JobQueue;

/// How long shutdown waits for in-flight jobs.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// Bounded pool of workers draining the job queue.
#[derive(Debug)]
pub struct WorkerRunner {
    queue: JobQueue,
    executor: Arc<JobExecutor>,
    config: WorkerConfig,
}

impl WorkerRunner {
    /// Create a new worker runner.
    pub fn new(queue: JobQueue, executor: Arc<JobExecutor>, config: WorkerConfig) -> Self {
        Self {
            queue,
            executor,
            config,
        }
    }

    /// Run until the shutdown signal flips to `true`, then wait for
    /// in-flight jobs.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let concurrency = self.config.concurrency.max(1);
        info!(
            concurrency,
            poll_interval_secs = self.config.poll_interval_seconds,
            "Worker started"
        );

        if let Err(e) = self.queue.recover_interrupted().await {
            error!(error = %e, "Failed to recover interrupted jobs");
        }

        let semaphore = Arc::new(Semaphore::new(concurrency));
        let poll_interval = Duration::from_secs(self.config.poll_interval_seconds.max(1));
        let notify = self.queue.notifier();

        loop {
            let permit = tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() { break; }
                    continue;
                }
                permit = Arc::clone(&semaphore).acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
            };

            match self.queue.dequeue().await {
                Ok(Some(job)) => {
                    let queue = self.queue.clone();
                    let executor = Arc::clone(&self.executor);
                    let timeout = self.job_timeout();
                    tokio::spawn(async move {
                        let _permit = permit;
                        process(&queue, &executor, job, timeout).await;
                    });
                    continue;
                }
                Ok(None) => trace!("No jobs queued"),
                Err(e) => error!(error = %e, "Failed to claim job"),
            }
            drop(permit);

            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() { break; }
                }
                _ = notify.notified() => {}
                _ = tokio::time::sleep(poll_interval) => {}
            }
        }

        info!("Worker waiting for in-flight jobs");
        let all = u32::try_from(concurrency).unwrap_or(u32::MAX);
        if tokio::time::timeout(SHUTDOWN_GRACE, semaphore.acquire_many(all))
            .await
            .is_err()
        {
            warn!("In-flight jobs still running after shutdown grace period");
        }
        info!("Worker shut down");
    }

    /// Process queued jobs one at a time until the queue is empty.
    /// Returns the number of jobs processed.
    pub async fn drain(&self) -> AppResult<usize> {
        let mut processed = 0;
        while let Some(job) = self.queue.dequeue().await? {
            process(&self.queue, &self.executor, job, self.job_timeout()).await;
            processed += 1;
        }
        Ok(processed)
    }

    fn job_timeout(&self) -> Duration {
        Duration::from_secs(self.config.job_timeout_seconds)
    }
}

/// Run one claimed job to a terminal state.
async fn process(queue: &JobQueue, executor: &JobExecutor, job: DerivativeJob, timeout: Duration) {
    let outcome = match tokio::time::timeout(timeout, executor.execute(&job)).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(e.into_failure()),
        Err(_) => Err(JobFailure::GenerationError(format!(
            "Timed out after {}s",
            timeout.as_secs()
        ))),
    };

    match outcome {
        Ok(()) => {
            if let Err(e) = queue.complete(job.id).await {
                error!(job_id = %job.id, error = %e, "Failed to mark job as completed");
            } else {
                info!(job_id = %job.id, "Job completed");
            }
        }
        Err(failure) => {
            warn!(
                job_id = %job.id,
                reason = failure.code(),
                error = %failure,
                "Job failed"
            );
            if let Err(e) = queue.fail(job.id, &failure).await {
                error!(job_id = %job.id, error = %e, "Failed to mark job as failed");
            }
        }
    }
}
