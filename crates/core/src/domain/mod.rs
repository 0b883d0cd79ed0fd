// Domain Layer - Writer identity, requests and job state

pub mod job;
pub mod slug;
pub mod writer;

// Re-exports
pub use job::{AsyncJob, JobStatus};
pub use slug::derive_identifier;
pub use writer::{
    CreateWriterJob, CreatedConfiguration, ProvisionedResource, ProvisioningRequest,
    WriterConfigurationForm, WriterId, DEFAULT_AUTH_TOKEN,
};
