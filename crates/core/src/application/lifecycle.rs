// Resource Lifecycle - Create/Read/Update/Delete contract for the host

use crate::application::provisioner::Provisioner;
use crate::domain::{ProvisionedResource, ProvisioningRequest};
use crate::error::Result;
use async_trait::async_trait;
use tracing::info;

/// Lifecycle operations a host invokes for one managed resource.
///
/// Operations take immutable values and return the new state; the host owns
/// persistence and threads state between calls.
#[async_trait]
pub trait ResourceLifecycle: Send + Sync {
    async fn create(&self, req: &ProvisioningRequest) -> Result<ProvisionedResource>;

    async fn read(&self, state: &ProvisionedResource) -> Result<ProvisionedResource>;

    async fn update(
        &self,
        req: &ProvisioningRequest,
        state: &ProvisionedResource,
    ) -> Result<ProvisionedResource>;

    async fn delete(&self, state: &ProvisionedResource) -> Result<()>;
}

/// GoodData writer resource
///
/// Only `create` talks to Keboola. `read` never re-fetches remote state, so
/// drift is never detected; `update` only records the declared values and
/// re-reads; `delete` makes no remote call.
pub struct GoodDataWriterResource {
    provisioner: Provisioner,
}

impl GoodDataWriterResource {
    pub fn new(provisioner: Provisioner) -> Self {
        Self { provisioner }
    }
}

#[async_trait]
impl ResourceLifecycle for GoodDataWriterResource {
    async fn create(&self, req: &ProvisioningRequest) -> Result<ProvisionedResource> {
        let resource = self.provisioner.provision(req).await?;
        self.read(&resource).await
    }

    async fn read(&self, state: &ProvisionedResource) -> Result<ProvisionedResource> {
        info!(id = %state.id, "Reading GoodData writer from Keboola");
        Ok(state.clone())
    }

    async fn update(
        &self,
        req: &ProvisioningRequest,
        state: &ProvisionedResource,
    ) -> Result<ProvisionedResource> {
        info!(id = %state.id, "Updating GoodData writer in Keboola");

        // id and writer_id are fixed at creation
        let declared = ProvisionedResource {
            name: req.name.clone(),
            description: req.description.clone(),
            ..state.clone()
        };
        self.read(&declared).await
    }

    async fn delete(&self, state: &ProvisionedResource) -> Result<()> {
        info!(id = %state.id, "Deleting GoodData writer in Keboola");
        Ok(())
    }
}
