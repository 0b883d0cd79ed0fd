// Application Layer - Use Cases and Business Logic

pub mod constants;
pub mod job_poller;
pub mod lifecycle;
pub mod provisioner;

// Re-exports
pub use job_poller::JobPoller;
pub use lifecycle::{GoodDataWriterResource, ResourceLifecycle};
pub use provisioner::{Provisioner, ProvisioningStage};
