#![allow(clippy::unwrap_used)] // Integration tests use unwrap for brevity

//! Integration tests for the Lambda handler wiring and replay mode.
//!
//! The Lambda request id must reach the callback as `UniqueId`, and relay
//! errors must fail the invocation.

use std::io::Write;

use lambda_runtime::{Context, LambdaEvent};
use mockito::{Matcher, Server};
use serde_json::{Value, json};

use buildsignal_core::{RelayConfig, RelayOutcome, SignalRelay};
use buildsignal_relay::{handle_event, replay_file};

fn envelope(status: &str, arn: &str) -> Value {
    let message = json!({ "state": { "status": status }, "arn": arn }).to_string();
    json!({ "Records": [{ "Sns": { "Message": message } }] })
}

fn lambda_event(payload: Value, request_id: &str) -> LambdaEvent<Value> {
    let mut context = Context::default();
    context.request_id = request_id.to_string();
    LambdaEvent::new(payload, context)
}

#[tokio::test]
async fn lambda_request_id_becomes_unique_id() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/")
        .match_body(Matcher::PartialJson(json!({
            "Status": "SUCCESS",
            "UniqueId": "8476a536-e9f4-11e8-9739-2dfe598c3fcd",
        })))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let relay = SignalRelay::new(
        RelayConfig::new()
            .with_callback_url(server.url())
            .with_watch_target("X"),
    )
    .unwrap();

    let summary = handle_event(
        &relay,
        lambda_event(
            envelope("AVAILABLE", "X"),
            "8476a536-e9f4-11e8-9739-2dfe598c3fcd",
        ),
    )
    .await
    .unwrap();

    assert!(summary.signaled);
    mock.assert_async().await;
}

#[tokio::test]
async fn relay_error_fails_invocation() {
    let relay = SignalRelay::new(RelayConfig::new().with_watch_target("X")).unwrap();
    let err = handle_event(&relay, lambda_event(envelope("AVAILABLE", "X"), "req"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("callback endpoint is not set"));
}

#[tokio::test]
async fn mismatch_returns_skip_summary() {
    let relay = SignalRelay::new(
        RelayConfig::new()
            .with_callback_url("http://127.0.0.1:9/")
            .with_watch_target("X"),
    )
    .unwrap();
    let summary = handle_event(&relay, lambda_event(envelope("FAILED", "Y"), "req"))
        .await
        .unwrap();
    assert!(!summary.signaled);
    assert_eq!(summary.skipped, Some("correlation_mismatch"));
}

#[tokio::test]
async fn replay_reads_envelope_from_disk() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/")
        .match_body(Matcher::PartialJson(json!({
            "Status": "FAILURE",
            "UniqueId": "replay-1",
        })))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", envelope("FAILED", "X")).unwrap();

    let relay = SignalRelay::new(
        RelayConfig::new()
            .with_callback_url(server.url())
            .with_watch_target("X"),
    )
    .unwrap();
    let outcome = replay_file(&relay, file.path(), "replay-1").await.unwrap();

    assert!(matches!(outcome, RelayOutcome::Signaled(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn replay_missing_file_is_error() {
    let relay =
        SignalRelay::new(RelayConfig::new().with_callback_url("http://127.0.0.1:9/")).unwrap();
    let err = replay_file(&relay, std::path::Path::new("/nonexistent/envelope.json"), "r")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Failed to read envelope"));
}
