// Writer Domain Model

use serde::{Deserialize, Deserializer, Serialize};

use super::slug::derive_identifier;
use crate::error::{ProvisionError, Result};

/// Auth token sent with the project creation job when none is configured
pub const DEFAULT_AUTH_TOKEN: &str = "keboola_demo";

/// Derived writer identifier (slug of the writer name)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WriterId(String);

impl WriterId {
    pub fn from_name(name: &str) -> Self {
        Self(derive_identifier(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for WriterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Declared writer, as supplied by the operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisioningRequest {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default = "default_auth_token")]
    pub auth_token: String,
}

fn default_auth_token() -> String {
    DEFAULT_AUTH_TOKEN.to_string()
}

impl ProvisioningRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            auth_token: default_auth_token(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_auth_token(mut self, auth_token: impl Into<String>) -> Self {
        self.auth_token = auth_token.into();
        self
    }

    /// Reject names that cannot produce a writer identifier
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ProvisionError::Validation(
                "Writer name cannot be empty".to_string(),
            ));
        }

        if !self.name.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(ProvisionError::Validation(format!(
                "Writer name '{}' must contain at least one ASCII letter or digit",
                self.name
            )));
        }

        Ok(())
    }
}

/// Project creation job payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWriterJob {
    pub writer_id: WriterId,
    pub description: String,
    pub auth_token: String,
}

/// Configuration registration form (form-encoded)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriterConfigurationForm {
    pub name: String,
    pub description: String,
    pub configuration_id: WriterId,
}

/// Registration response; `id` is the durable handle of the writer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedConfiguration {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
}

/// Accept the id as a JSON string or integer, keeping its textual form
fn opaque_id<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// Writer that completed both provisioning phases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionedResource {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub writer_id: WriterId,
}
