// Configuration Registry Port
// Abstraction over the synchronous API that records writer configurations

use crate::domain::{CreatedConfiguration, WriterConfigurationForm};
use crate::error::Result;
use async_trait::async_trait;

/// Configuration registry interface
///
/// Exposes registration only. There is no removal call: a project created
/// before a failed registration is left in place.
#[async_trait]
pub trait ConfigurationRegistry: Send + Sync {
    /// Register a writer configuration and return its assigned id
    async fn register(&self, form: &WriterConfigurationForm) -> Result<CreatedConfiguration>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::error::ProvisionError;
    use std::sync::Mutex;

    /// Mock registry behavior
    #[derive(Debug, Clone)]
    pub enum MockRegistryBehavior {
        /// Return the given id
        Assign(String),
        /// Fail with a remote error (status, message)
        Reject(u16, String),
    }

    /// Mock Configuration Registry for testing
    pub struct MockConfigurationRegistry {
        behavior: MockRegistryBehavior,
        forms: Mutex<Vec<WriterConfigurationForm>>,
    }

    impl MockConfigurationRegistry {
        pub fn new(behavior: MockRegistryBehavior) -> Self {
            Self {
                behavior,
                forms: Mutex::new(Vec::new()),
            }
        }

        pub fn assigning(id: impl Into<String>) -> Self {
            Self::new(MockRegistryBehavior::Assign(id.into()))
        }

        pub fn rejecting(status: u16, message: impl Into<String>) -> Self {
            Self::new(MockRegistryBehavior::Reject(status, message.into()))
        }

        pub fn call_count(&self) -> usize {
            self.forms.lock().unwrap().len()
        }

        pub fn forms(&self) -> Vec<WriterConfigurationForm> {
            self.forms.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ConfigurationRegistry for MockConfigurationRegistry {
        async fn register(&self, form: &WriterConfigurationForm) -> Result<CreatedConfiguration> {
            self.forms.lock().unwrap().push(form.clone());

            match &self.behavior {
                MockRegistryBehavior::Assign(id) => Ok(CreatedConfiguration { id: id.clone() }),
                MockRegistryBehavior::Reject(status, message) => Err(ProvisionError::Remote {
                    status: *status,
                    message: message.clone(),
                }),
            }
        }
    }
}
