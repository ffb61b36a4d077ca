mod common;

use common::{closed_port_url, spawn_backend, StubReply};
use plantvoice_assistant::{
    merge_plant_into_url, BackendClient, BackendConfig, BackendError, ChatMessage,
};
use serde_json::json;
use std::time::Duration;

fn client(url: &str, token: &str) -> BackendClient {
    BackendClient::new(BackendConfig::new(url, token)).expect("client should build")
}

#[tokio::test]
async fn test_call_sends_payload_and_headers() {
    let backend = spawn_backend(StubReply::json(200, json!({ "answer": "120 kWh" }))).await;
    let client = client(&backend.url, "svc-token");
    let url = merge_plant_into_url(&backend.url, "PW1");

    let reply = client
        .call(&url, "quanto gerei hoje", None)
        .await
        .expect("call should succeed");

    assert_eq!(reply.status, 200);
    assert!(reply.content_type.starts_with("application/json"));
    assert_eq!(reply.raw_body, r#"{"answer":"120 kWh"}"#);

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.uri.query(), Some("powerstation_id=PW1"));
    assert_eq!(request.headers["authorization"], "Bearer svc-token");
    assert_eq!(request.headers["accept"], "application/json");
    assert_eq!(request.headers["content-type"], "application/json");
    assert_eq!(
        request.headers["user-agent"],
        "plantvoice/assistant-chat/1.0"
    );
    assert_eq!(
        request.body,
        json!({
            "input": "quanto gerei hoje",
            "messages": [{ "role": "user", "content": "quanto gerei hoje" }]
        })
    );
}

#[tokio::test]
async fn test_call_forwards_explicit_history() {
    let backend = spawn_backend(StubReply::json(200, json!({ "answer": "ok" }))).await;
    let client = client(&backend.url, "svc-token");
    let history = vec![
        ChatMessage::user("quanto gerei ontem"),
        ChatMessage {
            role: "assistant".to_string(),
            content: "30 kWh".to_string(),
        },
        ChatMessage::user("e hoje?"),
    ];

    client
        .call(&backend.url, "e hoje?", Some(&history))
        .await
        .expect("call should succeed");

    let body = &backend.requests()[0].body;
    assert_eq!(body["input"], "e hoje?");
    assert_eq!(body["messages"].as_array().unwrap().len(), 3);
    assert_eq!(body["messages"][1]["role"], "assistant");
}

#[tokio::test]
async fn test_missing_credential_makes_no_network_call() {
    let backend = spawn_backend(StubReply::json(200, json!({ "answer": "never" }))).await;

    for token in ["", "   "] {
        let result = client(&backend.url, token)
            .call(&backend.url, "quanto gerei hoje", None)
            .await;
        assert_eq!(result, Err(BackendError::MissingCredential));
    }

    assert_eq!(backend.hits(), 0);
}

#[tokio::test]
async fn test_non_200_status_is_returned_not_raised() {
    let backend = spawn_backend(StubReply::text(503, "unavailable")).await;

    let reply = client(&backend.url, "svc-token")
        .call(&backend.url, "oi", None)
        .await
        .expect("status errors are replies");

    assert_eq!(reply.status, 503);
    assert!(!reply.is_ok());
    assert_eq!(reply.raw_body, "unavailable");
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let url = closed_port_url().await;

    match client(&url, "svc-token").call(&url, "oi", None).await {
        Err(BackendError::Transport(_)) => {}
        other => panic!("expected transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let backend = spawn_backend(
        StubReply::json(200, json!({ "answer": "late" })).delayed(Duration::from_secs(3)),
    )
    .await;
    let config = BackendConfig::new(&backend.url, "svc-token").with_timeout_seconds(1);
    let client = BackendClient::new(config).unwrap();

    let result = client.call(&backend.url, "oi", None).await;

    assert!(
        matches!(result, Err(BackendError::Transport(_))),
        "expected timeout, got {:?}",
        result
    );
    assert_eq!(backend.hits(), 1);
}

#[tokio::test]
async fn test_redirects_are_followed() {
    let backend = spawn_backend(StubReply::json(200, json!({ "answer": "moved" }))).await;
    let url = merge_plant_into_url(&backend.redirect_url, "PW1");

    let reply = client(&backend.url, "svc-token")
        .call(&url, "oi", None)
        .await
        .expect("redirect should be followed");

    assert_eq!(reply.status, 200);
    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].uri.query(), Some("powerstation_id=PW1"));
    assert_eq!(requests[0].body["input"], "oi");
}

#[tokio::test]
async fn test_invalid_utf8_body_is_decoded_lossily() {
    let backend = spawn_backend(StubReply {
        status: 200,
        content_type: "text/plain",
        body: b"energia \xff hoje".to_vec(),
        delay: None,
    })
    .await;

    let reply = client(&backend.url, "svc-token")
        .call(&backend.url, "oi", None)
        .await
        .expect("undecodable bytes are replaced, not raised");

    assert_eq!(reply.raw_body, "energia \u{fffd} hoje");
    assert_eq!(reply.content_type, "text/plain");
}
