//! HTTP handlers for the voice platform.

use crate::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Extension},
    response::{IntoResponse, Response},
    Json,
};
use plantvoice_assistant::messages;
use plantvoice_types::{IntentEvent, ResponseEnvelope, SpokenResponse};
use serde_json::{json, Value};
use std::any::Any;
use std::sync::Arc;

/// Handler for `POST /alexa`.
///
/// Always answers `200` with a response envelope. Bodies that cannot be read
/// or are not JSON get the generic apology; everything else goes through
/// [`plantvoice_assistant::Assistant::handle`].
pub async fn skill_handler(
    Extension(state): Extension<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Json<ResponseEnvelope> {
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read skill request body");
            return Json(apology().to_envelope());
        }
    };

    let event: IntentEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(error = %e, bytes = body.len(), "skill request body is not JSON");
            return Json(apology().to_envelope());
        }
    };

    tracing::info!(
        request_type = event.request_type.as_str(),
        intent = event.intent_name.as_deref().unwrap_or("<none>"),
        "handling skill request"
    );

    let spoken = state.assistant.handle(&event).await;
    Json(spoken.to_envelope())
}

/// Health check handler.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Converts a handler panic into the apology envelope.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(panic = %detail, "skill handler panicked");
    Json(apology().to_envelope()).into_response()
}

fn apology() -> SpokenResponse {
    SpokenResponse::end(messages::APOLOGY)
}
