//! plantvoice server library logic.

pub mod api;
pub mod config;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Router,
};
use plantvoice_assistant::{Assistant, AssistantError, BackendClient};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The skill. Immutable after startup.
    pub assistant: Arc<Assistant>,
}

impl AppState {
    pub fn new(assistant: Assistant) -> Self {
        Self {
            assistant: Arc::new(assistant),
        }
    }
}

/// Maximum request body size (256 KiB). Platform events are a few KiB.
const MAX_REQUEST_BODY_BYTES: usize = 256 * 1024;

/// Builds the assistant from loaded configuration.
///
/// # Errors
///
/// Returns `AssistantError` if the backend URL or timeout is invalid or the
/// HTTP client cannot be created. A missing token is not an error here; it is
/// reported per request.
pub fn build_assistant(config: &config::Config) -> Result<Assistant, AssistantError> {
    if !config.backend.has_credential() {
        tracing::warn!("no assistant token configured; route intents will fail with code 401");
    }
    let backend = BackendClient::new(config.backend.clone())?;
    Ok(Assistant::new(
        backend,
        config.skill.clone(),
        config.answer.clone(),
    ))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/alexa", post(api::skill_handler))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(api::handle_panic))
        .layer(Extension(Arc::new(state)))
}
