// Keboola HTTP client
// Implements JobQueue (Syrup) and ConfigurationRegistry (Storage API)
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Response, Url};
use serde::Serialize;
use tracing::debug;

use kbc_writer_core::application::constants::{WRITER_CONFIGS_PATH, WRITER_JOB_PATH};
use kbc_writer_core::domain::{
    AsyncJob, CreateWriterJob, CreatedConfiguration, WriterConfigurationForm,
};
use kbc_writer_core::port::{ConfigurationRegistry, JobQueue};
use kbc_writer_core::{ProvisionError, Result};

use crate::config::KbcConfig;
use crate::error::{extract_error, has_errors, transport};

/// Header carrying the Storage API token on every request
pub const STORAGE_API_TOKEN_HEADER: &str = "x-storageapi-token";

/// Keboola Connection client
///
/// Wraps a single `reqwest::Client`; cheap to share behind an `Arc` across
/// concurrent provisioning runs.
pub struct KbcClient {
    http: reqwest::Client,
    storage_host: String,
    syrup_host: String,
}

impl KbcClient {
    /// Create a client from connection settings
    ///
    /// # Example
    /// ```ignore
    /// let client = KbcClient::new(KbcConfig::from_env()?)?;
    /// ```
    pub fn new(config: KbcConfig) -> Result<Self> {
        let mut token = HeaderValue::from_str(&config.storage_api_token).map_err(|e| {
            ProvisionError::Validation(format!("Invalid storage API token: {}", e))
        })?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(STORAGE_API_TOKEN_HEADER, token);

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()
            .map_err(transport)?;

        Ok(Self {
            http,
            storage_host: config.storage_host,
            syrup_host: config.syrup_host,
        })
    }

    pub async fn post_to_syrup<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<String> {
        let url = join_url(&self.syrup_host, path);
        debug!(url = %url, "POST syrup");

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        read_body(response).await
    }

    pub async fn get_from_syrup(&self, path: &str) -> Result<String> {
        let url = join_url(&self.syrup_host, path);
        debug!(url = %url, "GET syrup");

        let response = self.http.get(&url).send().await.map_err(transport)?;
        read_body(response).await
    }

    pub async fn post_to_storage<T: Serialize + ?Sized>(&self, path: &str, form: &T) -> Result<String> {
        let url = join_url(&self.storage_host, path);
        debug!(url = %url, "POST storage");

        let response = self
            .http
            .post(&url)
            .form(form)
            .send()
            .await
            .map_err(transport)?;
        read_body(response).await
    }
}

#[async_trait]
impl JobQueue for KbcClient {
    async fn submit_writer_job(&self, job: &CreateWriterJob) -> Result<AsyncJob> {
        let body = self.post_to_syrup(WRITER_JOB_PATH, job).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn job_status(&self, url: &str) -> Result<AsyncJob> {
        let path = job_status_path(url)?;
        let body = self.get_from_syrup(&path).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ConfigurationRegistry for KbcClient {
    async fn register(&self, form: &WriterConfigurationForm) -> Result<CreatedConfiguration> {
        let body = self.post_to_storage(WRITER_CONFIGS_PATH, form).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Read the body of a response, turning non-2xx statuses into remote errors
async fn read_body(response: Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await.map_err(transport)?;

    if has_errors(status) {
        return Err(extract_error(status, &body));
    }

    Ok(body)
}

/// Join a base host and a relative API path with exactly one slash
pub fn join_url(host: &str, path: &str) -> String {
    format!(
        "{}/{}",
        host.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Resolve the Syrup path polled for a job from the absolute `url` it reports
pub fn job_status_path(url: &str) -> Result<String> {
    let parsed = Url::parse(url)
        .map_err(|e| ProvisionError::Decode(format!("Invalid job url '{}': {}", url, e)))?;

    Ok(parsed.path().trim_start_matches('/').to_string())
}
