// Job Poller - drives an async job to a terminal status

use crate::domain::AsyncJob;
use crate::error::{ProvisionError, Result};
use crate::port::{Delay, JobQueue};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Polls a job's status URL until it reaches a terminal status.
///
/// There is no deadline and no attempt cap: a job that never leaves a
/// non-terminal status keeps the caller waiting indefinitely. Transport and
/// decode failures are not retried.
pub struct JobPoller {
    job_queue: Arc<dyn JobQueue>,
    delay: Arc<dyn Delay>,
    interval: Duration,
}

impl JobPoller {
    pub fn new(job_queue: Arc<dyn JobQueue>, delay: Arc<dyn Delay>, interval: Duration) -> Self {
        Self {
            job_queue,
            delay,
            interval,
        }
    }

    /// Poll until `success` (returns the final job) or a failed terminal
    /// status (returns `ProvisionError::JobFailed`).
    ///
    /// The status carried by `job` itself is never treated as final; at least
    /// one poll is always made. The delay runs only between polls.
    pub async fn await_terminal(&self, mut job: AsyncJob) -> Result<AsyncJob> {
        let mut polls: u64 = 0;

        loop {
            let polled = self.job_queue.job_status(&job.url).await?;
            polls += 1;
            job.refresh(polled);

            debug!(url = %job.url, status = %job.status, polls, "Polled job status");

            if job.status.is_terminal() {
                break;
            }

            self.delay.sleep(self.interval).await;
        }

        if job.status.is_success() {
            info!(url = %job.url, polls, "Job finished successfully");
            return Ok(job);
        }

        let message = job
            .reported_error()
            .unwrap_or_else(|| format!("job at {} did not succeed", job.url));

        warn!(url = %job.url, status = %job.status, polls, error = %message, "Job failed");

        Err(ProvisionError::JobFailed {
            status: job.status.to_string(),
            message,
        })
    }
}
