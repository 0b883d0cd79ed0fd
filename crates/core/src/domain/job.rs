// Async Job Domain Model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Job status as reported by the job queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Waiting,
    Processing,
    Success,
    Error,
    Cancelled,
    Terminated,
    /// Any status string this crate does not know; treated as in progress
    Other(String),
}

impl JobStatus {
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Waiting => "waiting",
            JobStatus::Processing => "processing",
            JobStatus::Success => "success",
            JobStatus::Error => "error",
            JobStatus::Cancelled => "cancelled",
            JobStatus::Terminated => "terminated",
            JobStatus::Other(s) => s,
        }
    }

    /// Polling stops once this returns true
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Success | JobStatus::Error | JobStatus::Cancelled | JobStatus::Terminated
        )
    }

    pub fn is_success(&self) -> bool {
        *self == JobStatus::Success
    }
}

impl From<&str> for JobStatus {
    fn from(s: &str) -> Self {
        match s {
            "waiting" => JobStatus::Waiting,
            "processing" => JobStatus::Processing,
            "success" => JobStatus::Success,
            "error" => JobStatus::Error,
            "cancelled" => JobStatus::Cancelled,
            "terminated" => JobStatus::Terminated,
            other => JobStatus::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for JobStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for JobStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(JobStatus::from(s.as_str()))
    }
}

/// Async job state returned by submission and by every status poll.
///
/// `url` and `status` are required; a body missing either fails to decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsyncJob {
    pub url: String,
    pub status: JobStatus,

    /// Job outcome payload; carries the job's own error message on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
}

impl AsyncJob {
    pub fn new(url: impl Into<String>, status: JobStatus) -> Self {
        Self {
            url: url.into(),
            status,
            result: None,
        }
    }

    pub fn with_result(mut self, result: serde_json::Value) -> Self {
        self.result = Some(result);
        self
    }

    /// Error message reported by the job itself, if any
    ///
    /// Looks at `result.message`, then `result.error`, then a bare string `result`.
    pub fn reported_error(&self) -> Option<String> {
        let result = self.result.as_ref()?;

        if let Some(s) = result.as_str() {
            return Some(s.to_string());
        }

        ["message", "error"]
            .iter()
            .filter_map(|key| result.get(key))
            .find_map(|v| v.as_str())
            .map(str::to_string)
    }

    /// Overwrite status and result with a fresh poll response
    ///
    /// `url` stays the locator returned at submission; whatever a poll
    /// response reports there is ignored.
    pub fn refresh(&mut self, polled: AsyncJob) {
        self.status = polled.status;
        self.result = polled.result;
    }
}
