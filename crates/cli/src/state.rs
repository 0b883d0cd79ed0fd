//! Local state file tracking provisioned writers by assigned id

use anyhow::{Context, Result};
use kbc_writer_core::domain::ProvisionedResource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_STATE_PATH: &str = "~/.kbc-writer/state.json";

/// Resources the host currently tracks
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TrackedState {
    #[serde(default)]
    pub resources: BTreeMap<String, ProvisionedResource>,
}

impl TrackedState {
    pub fn get(&self, id: &str) -> Result<&ProvisionedResource> {
        self.resources
            .get(id)
            .with_context(|| format!("No tracked writer with id '{}'", id))
    }

    pub fn put(&mut self, resource: ProvisionedResource) {
        self.resources.insert(resource.id.clone(), resource);
    }

    pub fn remove(&mut self, id: &str) -> Option<ProvisionedResource> {
        self.resources.remove(id)
    }
}

/// JSON file holding the tracked state
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Open a store at `path`, expanding a leading `~`
    pub fn open(path: &str) -> Self {
        Self {
            path: PathBuf::from(shellexpand::tilde(path).into_owned()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the state; a missing file is an empty state
    pub fn load(&self) -> Result<TrackedState> {
        if !self.path.exists() {
            return Ok(TrackedState::default());
        }

        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read state file {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Corrupt state file {}", self.path.display()))
    }

    pub fn save(&self, state: &TrackedState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let raw = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write state file {}", self.path.display()))
    }
}
