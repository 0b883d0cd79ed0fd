// Provisioning Orchestrator - two-phase writer creation

use crate::application::constants::JOB_POLL_INTERVAL;
use crate::application::job_poller::JobPoller;
use crate::domain::{
    CreateWriterJob, ProvisionedResource, ProvisioningRequest, WriterConfigurationForm, WriterId,
};
use crate::error::{ProvisionError, Result};
use crate::port::{ConfigurationRegistry, Delay, JobQueue, TokioDelay};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Provisioning stages, in workflow order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisioningStage {
    Init,
    SlugComputed,
    JobSubmitted,
    Polling,
    JobSucceeded,
    JobFailed,
    ConfigSubmitted,
    Done,
    Failed,
}

impl std::fmt::Display for ProvisioningStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProvisioningStage::Init => write!(f, "INIT"),
            ProvisioningStage::SlugComputed => write!(f, "SLUG_COMPUTED"),
            ProvisioningStage::JobSubmitted => write!(f, "JOB_SUBMITTED"),
            ProvisioningStage::Polling => write!(f, "POLLING"),
            ProvisioningStage::JobSucceeded => write!(f, "JOB_SUCCEEDED"),
            ProvisioningStage::JobFailed => write!(f, "JOB_FAILED"),
            ProvisioningStage::ConfigSubmitted => write!(f, "CONFIG_SUBMITTED"),
            ProvisioningStage::Done => write!(f, "DONE"),
            ProvisioningStage::Failed => write!(f, "FAILED"),
        }
    }
}

impl ProvisioningStage {
    /// Stage a polling error ends in; only a job's own failed status is `JobFailed`
    pub fn for_poll_error(err: &ProvisionError) -> Self {
        match err {
            ProvisionError::JobFailed { .. } => ProvisioningStage::JobFailed,
            _ => ProvisioningStage::Failed,
        }
    }
}

/// Writer provisioner
///
/// Phase one creates the backing project through the job queue and waits for
/// the job; phase two registers the writer configuration. Phase two never
/// runs unless phase one succeeded. A phase-two failure leaves the project
/// created in phase one in place: nothing is rolled back.
pub struct Provisioner {
    job_queue: Arc<dyn JobQueue>,
    registry: Arc<dyn ConfigurationRegistry>,
    poller: JobPoller,
}

impl Provisioner {
    /// Create a provisioner polling with the fixed 250ms interval
    pub fn new(job_queue: Arc<dyn JobQueue>, registry: Arc<dyn ConfigurationRegistry>) -> Self {
        Self::with_delay(job_queue, registry, Arc::new(TokioDelay))
    }

    /// Create a provisioner with an injected delay (for deterministic testing)
    pub fn with_delay(
        job_queue: Arc<dyn JobQueue>,
        registry: Arc<dyn ConfigurationRegistry>,
        delay: Arc<dyn Delay>,
    ) -> Self {
        let poller = JobPoller::new(Arc::clone(&job_queue), delay, JOB_POLL_INTERVAL);
        Self {
            job_queue,
            registry,
            poller,
        }
    }

    /// Run both phases and return the provisioned writer
    pub async fn provision(&self, req: &ProvisioningRequest) -> Result<ProvisionedResource> {
        info!(stage = %ProvisioningStage::Init, name = %req.name, "Creating GoodData writer in Keboola");

        match self.run(req).await {
            Ok(resource) => {
                info!(
                    stage = %ProvisioningStage::Done,
                    id = %resource.id,
                    writer_id = %resource.writer_id,
                    "Writer provisioned"
                );
                Ok(resource)
            }
            Err(e) => {
                error!(stage = %ProvisioningStage::Failed, name = %req.name, error = %e, "Provisioning failed");
                Err(e)
            }
        }
    }

    async fn run(&self, req: &ProvisioningRequest) -> Result<ProvisionedResource> {
        req.validate()?;

        // Computed once; the job payload and the registration form share it
        let writer_id = WriterId::from_name(&req.name);
        info!(stage = %ProvisioningStage::SlugComputed, writer_id = %writer_id, "Derived writer id");

        let create_job = CreateWriterJob {
            writer_id: writer_id.clone(),
            description: req.description.clone(),
            auth_token: req.auth_token.clone(),
        };
        let job = self.job_queue.submit_writer_job(&create_job).await?;
        info!(
            stage = %ProvisioningStage::JobSubmitted,
            writer_id = %writer_id,
            url = %job.url,
            status = %job.status,
            "Project creation job submitted"
        );

        info!(stage = %ProvisioningStage::Polling, url = %job.url, "Waiting for project creation job");
        if let Err(e) = self.poller.await_terminal(job).await {
            // Transport and decode errors fall through to the FAILED log in `provision`
            if ProvisioningStage::for_poll_error(&e) == ProvisioningStage::JobFailed {
                warn!(stage = %ProvisioningStage::JobFailed, writer_id = %writer_id, "Project creation job did not succeed");
            }
            return Err(e);
        }
        info!(stage = %ProvisioningStage::JobSucceeded, writer_id = %writer_id, "Project created");

        let form = WriterConfigurationForm {
            name: req.name.clone(),
            description: req.description.clone(),
            configuration_id: writer_id.clone(),
        };
        let created = self.registry.register(&form).await.map_err(|e| {
            warn!(
                writer_id = %writer_id,
                "Configuration registration failed; project created by the job is left in place"
            );
            e
        })?;
        info!(stage = %ProvisioningStage::ConfigSubmitted, id = %created.id, "Writer configuration registered");

        Ok(ProvisionedResource {
            id: created.id,
            name: req.name.clone(),
            description: req.description.clone(),
            writer_id,
        })
    }
}
