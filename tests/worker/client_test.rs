//! End-to-end tests for the worker client against scripted fake workers.
//!
//! The fake workers are /bin/sh one-liners speaking the NDJSON protocol;
//! they stand in for the pre-built analyzer binary.
#![cfg(unix)]

use std::time::Duration;

use pkgprobe::worker::protocol::{AnalyzeParams, Outcome};
use pkgprobe::worker::{WorkerClient, WorkerError};

/// Answers a single request with a success payload, echoing the request ID.
const ECHO_WORKER: &str = r#"
read line
id=$(printf '%s' "$line" | sed 's/.*"id":"\([^"]*\)".*/\1/')
printf '{"id":"%s","success":true,"result":{"name":"demo","version":"1.0.0","dependencies":{}}}\n' "$id"
"#;

/// Answers a single request with an error string.
const ERROR_WORKER: &str = r#"
read line
id=$(printf '%s' "$line" | sed 's/.*"id":"\([^"]*\)".*/\1/')
printf '{"id":"%s","success":false,"error":"bad package file"}\n' "$id"
"#;

/// Never answers.
const SILENT_WORKER: &str = "sleep 30\n";

/// Reads the request, then exits without responding.
const EXITING_WORKER: &str = "read line\nexit 0\n";

async fn spawn_fake(script: &str, timeout: Duration) -> WorkerClient {
    WorkerClient::spawn_with_args("/bin/sh", &["-c", script], timeout)
        .await
        .expect("failed to spawn fake worker")
}

#[tokio::test]
async fn roundtrip_success_payload() {
    let client = spawn_fake(ECHO_WORKER, Duration::from_secs(5)).await;
    assert_eq!(client.timeout(), Duration::from_secs(5));

    let outcome = client
        .analyze_manifest("/srv/app/package/package.json")
        .await
        .unwrap();

    match outcome {
        Outcome::Payload(project) => {
            assert_eq!(project["name"], "demo");
            assert_eq!(project["version"], "1.0.0");
            assert!(project["dependencies"].as_object().unwrap().is_empty());
        }
        Outcome::ErrorMessage(message) => panic!("unexpected error: {}", message),
    }
}

#[tokio::test]
async fn roundtrip_error_text() {
    let client = spawn_fake(ERROR_WORKER, Duration::from_secs(5)).await;

    let outcome = client
        .analyze_manifest("/srv/app/package/package.json")
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::ErrorMessage("bad package file".to_string()));
}

#[tokio::test]
async fn dispatch_returns_before_the_result() {
    // The send half is fire-and-forget; the wait half delivers the single
    // response.
    let client = spawn_fake(ECHO_WORKER, Duration::from_secs(5)).await;

    let pending = client
        .submit(AnalyzeParams {
            manifest: "/srv/app/package/package.json".to_string(),
        })
        .await
        .unwrap();

    let outcome = pending.wait().await.unwrap();
    assert!(!outcome.is_error());
}

#[tokio::test]
async fn unresponsive_worker_times_out() {
    let client = spawn_fake(SILENT_WORKER, Duration::from_millis(200)).await;

    let err = client
        .analyze_manifest("/srv/app/package/package.json")
        .await
        .unwrap_err();

    assert!(matches!(err, WorkerError::Timeout(_)));
}

#[tokio::test]
async fn worker_exit_is_detected() {
    let client = spawn_fake(EXITING_WORKER, Duration::from_secs(5)).await;

    let err = client
        .analyze_manifest("/srv/app/package/package.json")
        .await
        .unwrap_err();

    assert!(matches!(err, WorkerError::WorkerExited));
}

#[tokio::test]
async fn missing_worker_binary_fails_to_spawn() {
    let err = WorkerClient::spawn("/nonexistent/pkgprobe-worker")
        .await
        .err()
        .expect("spawn should fail");

    assert!(matches!(err, WorkerError::SpawnFailed(_)));
}
