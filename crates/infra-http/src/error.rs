//! Keboola error bodies and mapping to ProvisionError

use kbc_writer_core::ProvisionError;
use reqwest::StatusCode;
use serde::Deserialize;

/// Error body returned by Keboola APIs on non-success responses
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KbcErrorBody {
    pub error: String,
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(default)]
    pub exception_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// True when the response status is outside 2xx
pub fn has_errors(status: StatusCode) -> bool {
    !status.is_success()
}

/// Build a remote error, preferring the back end's own message
pub fn extract_error(status: StatusCode, body: &str) -> ProvisionError {
    let message = match serde_json::from_str::<KbcErrorBody>(body) {
        Ok(kbc) => match kbc.exception_id {
            Some(exception_id) => format!("{} (exceptionId: {})", kbc.error, exception_id),
            None => kbc.error,
        },
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };

    ProvisionError::Remote {
        status: status.as_u16(),
        message,
    }
}

/// Map a reqwest failure (connect, timeout, body read) to a transport error
pub fn transport(err: reqwest::Error) -> ProvisionError {
    ProvisionError::Transport(err.to_string())
}
