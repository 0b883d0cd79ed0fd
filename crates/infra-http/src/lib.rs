// KBC Writer Infrastructure - Keboola HTTP Adapter
// Implements: JobQueue (Syrup), ConfigurationRegistry (Storage API)

mod client;
mod config;
mod error;

pub use client::{job_status_path, join_url, KbcClient, STORAGE_API_TOKEN_HEADER};
pub use config::{ConfigError, KbcConfig, DEFAULT_STORAGE_HOST, DEFAULT_SYRUP_HOST};
pub use error::{extract_error, has_errors, KbcErrorBody};

pub use reqwest::StatusCode;
