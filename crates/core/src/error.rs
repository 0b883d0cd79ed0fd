// Central Error Type for the Provisioning Workflow

use thiserror::Error;

/// Provisioning error type
///
/// Every variant is fatal to the provisioning attempt that produced it.
/// Callers only need `Display`; the variants exist so adapters and tests can
/// tell transport, decode and remote-reported failures apart.
#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),

    /// Non-success HTTP response; `message` is the back end's own error text
    #[error("Remote error ({status}): {message}")]
    Remote { status: u16, message: String },

    /// Job reached a failed terminal status
    #[error("Job finished with status '{status}': {message}")]
    JobFailed { status: String, message: String },
}

/// Result type alias using ProvisionError
pub type Result<T> = std::result::Result<T, ProvisionError>;

impl From<serde_json::Error> for ProvisionError {
    fn from(err: serde_json::Error) -> Self {
        ProvisionError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_keeps_message_verbatim() {
        let err = ProvisionError::Remote {
            status: 400,
            message: "Writer already exists".to_string(),
        };
        assert_eq!(err.to_string(), "Remote error (400): Writer already exists");
    }

    #[test]
    fn test_json_error_maps_to_decode() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ProvisionError = json_err.into();
        assert!(matches!(err, ProvisionError::Decode(_)));
    }
}
