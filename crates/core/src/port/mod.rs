// Port Layer - Interfaces for external dependencies

pub mod configuration_registry;
pub mod delay; // For deterministic testing
pub mod job_queue;

// Re-exports
pub use configuration_registry::ConfigurationRegistry;
pub use delay::{Delay, TokioDelay};
pub use job_queue::JobQueue;
