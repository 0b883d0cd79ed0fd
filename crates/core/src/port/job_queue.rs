// Job Queue Port
// Abstraction over the asynchronous job API that creates writer projects

use crate::domain::{AsyncJob, CreateWriterJob};
use crate::error::Result;
use async_trait::async_trait;

/// Job queue interface
///
/// Implementations:
/// - KbcClient (infra-http): Keboola Syrup job queue
/// - mocks::MockJobQueue: scripted responses for tests
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Submit a project creation job and return its initial state
    ///
    /// # Errors
    /// - ProvisionError::Transport if the request cannot be sent
    /// - ProvisionError::Remote if the queue rejects the job
    /// - ProvisionError::Decode if the response is not a job state
    async fn submit_writer_job(&self, job: &CreateWriterJob) -> Result<AsyncJob>;

    /// Fetch the current state of a job from its status URL
    async fn job_status(&self, url: &str) -> Result<AsyncJob>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::domain::JobStatus;
    use crate::error::ProvisionError;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Mock job queue returning scripted responses in order
    ///
    /// Once the status script is exhausted every poll reports `waiting`.
    pub struct MockJobQueue {
        submission: Mutex<Option<Result<AsyncJob>>>,
        statuses: Mutex<VecDeque<Result<AsyncJob>>>,
        submitted: Mutex<Vec<CreateWriterJob>>,
        polled_urls: Mutex<Vec<String>>,
    }

    impl MockJobQueue {
        pub fn new(submission: Result<AsyncJob>, statuses: Vec<Result<AsyncJob>>) -> Self {
            Self {
                submission: Mutex::new(Some(submission)),
                statuses: Mutex::new(statuses.into()),
                submitted: Mutex::new(Vec::new()),
                polled_urls: Mutex::new(Vec::new()),
            }
        }

        /// Queue that accepts the job and then reports the given statuses
        pub fn with_statuses(url: &str, statuses: &[&str]) -> Self {
            Self::new(
                Ok(AsyncJob::new(url, JobStatus::Waiting)),
                statuses
                    .iter()
                    .map(|s| Ok(AsyncJob::new(url, JobStatus::from(*s))))
                    .collect(),
            )
        }

        /// Queue whose submission call fails
        pub fn failing_submission(err: ProvisionError) -> Self {
            Self::new(Err(err), Vec::new())
        }

        pub fn submitted(&self) -> Vec<CreateWriterJob> {
            self.submitted.lock().unwrap().clone()
        }

        pub fn poll_count(&self) -> usize {
            self.polled_urls.lock().unwrap().len()
        }

        pub fn polled_urls(&self) -> Vec<String> {
            self.polled_urls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl JobQueue for MockJobQueue {
        async fn submit_writer_job(&self, job: &CreateWriterJob) -> Result<AsyncJob> {
            self.submitted.lock().unwrap().push(job.clone());

            self.submission
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| {
                    Err(ProvisionError::Validation(
                        "MockJobQueue: job submitted twice".to_string(),
                    ))
                })
        }

        async fn job_status(&self, url: &str) -> Result<AsyncJob> {
            self.polled_urls.lock().unwrap().push(url.to_string());

            self.statuses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(AsyncJob::new(url, JobStatus::Waiting)))
        }
    }
}
