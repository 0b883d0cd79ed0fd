// Provisioning constants (no magic values)
use std::time::Duration;

/// Fixed delay between job status polls (250ms)
pub const JOB_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Job queue component path for GoodData writer project creation
pub const WRITER_JOB_PATH: &str = "gooddata-writer/v2";

/// Storage API path for GoodData writer configurations
pub const WRITER_CONFIGS_PATH: &str = "v2/storage/components/gooddata-writer/configs";
