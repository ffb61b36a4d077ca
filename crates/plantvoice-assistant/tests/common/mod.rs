//! Stub conversational backend for integration tests.
//!
//! Binds an axum server on `127.0.0.1:0`, records every request it receives,
//! and answers each one with a fixed reply.

#![allow(dead_code)]

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
    routing::post,
    Router,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const CHAT_PATH: &str = "/api/assistant/chat";

/// A request as seen by the stub.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Value,
}

/// The reply the stub sends for every request.
#[derive(Debug, Clone)]
pub struct StubReply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
    pub delay: Option<Duration>,
}

impl StubReply {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            content_type: "application/json; charset=utf-8",
            body: body.to_string().into_bytes(),
            delay: None,
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: body.as_bytes().to_vec(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Clone)]
struct StubState {
    reply: StubReply,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Handle to a running stub backend.
#[derive(Clone)]
pub struct StubBackend {
    /// Base URL of the chat endpoint.
    pub url: String,
    /// Base URL of an endpoint that redirects (307) to the chat endpoint.
    pub redirect_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubBackend {
    pub fn hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn chat_handler(
    State(state): State<StubState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
    state
        .requests
        .lock()
        .unwrap()
        .push(RecordedRequest { uri, headers, body });

    if let Some(delay) = state.reply.delay {
        tokio::time::sleep(delay).await;
    }

    let status = StatusCode::from_u16(state.reply.status).unwrap();
    (
        status,
        [(header::CONTENT_TYPE, state.reply.content_type)],
        state.reply.body.clone(),
    )
        .into_response()
}

async fn redirect_handler(uri: Uri) -> Redirect {
    let target = match uri.query() {
        Some(query) => format!("{}?{}", CHAT_PATH, query),
        None => CHAT_PATH.to_string(),
    };
    Redirect::temporary(&target)
}

pub async fn spawn_backend(reply: StubReply) -> StubBackend {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        reply,
        requests: requests.clone(),
    };
    let app = Router::new()
        .route(CHAT_PATH, post(chat_handler))
        .route("/old/chat", post(redirect_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubBackend {
        url: format!("http://{}{}", addr, CHAT_PATH),
        redirect_url: format!("http://{}/old/chat", addr),
        requests,
    }
}

/// A URL on which nothing is listening.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}{}", addr, CHAT_PATH)
}
