//! Wire format tests against recorded Keboola response bodies

use kbc_writer_core::domain::{AsyncJob, CreatedConfiguration, JobStatus};
use kbc_writer_core::ProvisionError;
use kbc_writer_infra_http::{extract_error, job_status_path, KbcErrorBody};

const SUBMIT_RESPONSE: &str = r#"{
    "id": "123456789",
    "url": "https://syrup.keboola.com/queue/job/123456789",
    "status": "waiting"
}"#;

const FAILED_JOB_RESPONSE: &str = r#"{
    "id": 123456789,
    "runId": "123456790",
    "project": {"id": 232, "name": "Sales"},
    "component": "gooddata-writer",
    "command": "run",
    "url": "https://syrup.keboola.com/queue/job/123456789",
    "status": "error",
    "result": {"message": "GoodData project could not be created"}
}"#;

const CONFIG_RESPONSE: &str = r#"{
    "id": "sales-data",
    "name": "Sales Data",
    "description": "x",
    "created": "2016-05-12T10:33:00+0200",
    "version": 1
}"#;

#[test]
fn test_submission_response_to_poll_path() {
    let job: AsyncJob = serde_json::from_str(SUBMIT_RESPONSE).unwrap();

    assert_eq!(job.status, JobStatus::Waiting);
    assert_eq!(job_status_path(&job.url).unwrap(), "queue/job/123456789");
}

#[test]
fn test_failed_job_carries_its_message() {
    let job: AsyncJob = serde_json::from_str(FAILED_JOB_RESPONSE).unwrap();

    assert_eq!(job.status, JobStatus::Error);
    assert!(job.status.is_terminal());
    assert_eq!(
        job.reported_error().as_deref(),
        Some("GoodData project could not be created")
    );
}

#[test]
fn test_configuration_response_id() {
    let created: CreatedConfiguration = serde_json::from_str(CONFIG_RESPONSE).unwrap();
    assert_eq!(created.id, "sales-data");
}

#[test]
fn test_malformed_bodies_fail_decode() {
    let err: ProvisionError = serde_json::from_str::<AsyncJob>(r#"{"url": "x"}"#)
        .unwrap_err()
        .into();
    assert!(matches!(err, ProvisionError::Decode(_)));

    let err: ProvisionError = serde_json::from_str::<CreatedConfiguration>("<html>502</html>")
        .unwrap_err()
        .into();
    assert!(matches!(err, ProvisionError::Decode(_)));
}

#[test]
fn test_storage_error_body() {
    let body = r#"{"error":"Configuration sales-data already exists.","code":"storage.components.configurations.alreadyExists","status":"error","exceptionId":"keboola-connection-7c1b"}"#;

    let parsed: KbcErrorBody = serde_json::from_str(body).unwrap();
    assert_eq!(parsed.status.as_deref(), Some("error"));

    let err = extract_error(reqwest_status(400), body);
    assert_eq!(
        err.to_string(),
        "Remote error (400): Configuration sales-data already exists. (exceptionId: keboola-connection-7c1b)"
    );
}

fn reqwest_status(code: u16) -> kbc_writer_infra_http::StatusCode {
    kbc_writer_infra_http::StatusCode::from_u16(code).unwrap()
}
