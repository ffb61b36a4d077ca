//! HTTP client for the conversational backend.

use crate::config::BackendConfig;
use crate::error::{AssistantError, BackendError};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

/// Query parameter carrying the plant identifier.
pub const POWERSTATION_PARAM: &str = "powerstation_id";

/// Characters of the reply body echoed to the debug log.
const BODY_PREVIEW_CHARS: usize = 600;

const MAX_REDIRECTS: usize = 10;

/// One turn of conversation history sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatPayload<'a> {
    input: &'a str,
    messages: &'a [ChatMessage],
}

/// Raw HTTP reply of the backend, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendReply {
    pub status: u16,
    /// `Content-Type` header as text; empty when absent.
    pub content_type: String,
    /// Body decoded as UTF-8, invalid sequences replaced.
    pub raw_body: String,
}

impl BackendReply {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

pub type BackendResult = Result<BackendReply, BackendError>;

/// Appends `powerstation_id=<plant_id>` to `base_url`.
///
/// Uses `&` when the URL already has a query component and `?` otherwise. An
/// empty plant id leaves the URL unchanged.
pub fn merge_plant_into_url(base_url: &str, plant_id: &str) -> String {
    if plant_id.is_empty() {
        return base_url.to_string();
    }
    let separator = if base_url.contains('?') { '&' } else { '?' };
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair(POWERSTATION_PARAM, plant_id)
        .finish();
    format!("{}{}{}", base_url, separator, query)
}

/// Client for the backend chat endpoint.
///
/// One attempt per call, no retries. The underlying `reqwest::Client` is
/// built once and reused across calls.
#[derive(Debug, Clone)]
pub struct BackendClient {
    config: BackendConfig,
    http: reqwest::Client,
}

impl BackendClient {
    /// Builds the client, rejecting a base URL that does not parse.
    pub fn new(config: BackendConfig) -> Result<Self, AssistantError> {
        url::Url::parse(&config.url).map_err(|e| {
            AssistantError::Config(format!("invalid backend url {:?}: {}", config.url, e))
        })?;
        if config.timeout_seconds == 0 {
            return Err(AssistantError::Config(
                "backend timeout_seconds must be greater than zero".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .connect_timeout(config.timeout())
            .timeout(config.timeout())
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Posts `user_query` to `url`.
    ///
    /// `history` replaces the default single-turn conversation when it is
    /// non-empty. Returns [`BackendError::MissingCredential`] before touching
    /// the network when no token is configured.
    pub async fn call(
        &self,
        url: &str,
        user_query: &str,
        history: Option<&[ChatMessage]>,
    ) -> BackendResult {
        if !self.config.has_credential() {
            tracing::warn!(url = %url, "assistant token missing, backend not called");
            return Err(BackendError::MissingCredential);
        }

        let single_turn;
        let messages = match history {
            Some(turns) if !turns.is_empty() => turns,
            _ => {
                single_turn = [ChatMessage::user(user_query)];
                &single_turn[..]
            }
        };
        let payload = ChatPayload {
            input: user_query,
            messages,
        };

        tracing::info!(url = %url, turns = messages.len(), "posting question to assistant backend");

        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .bearer_auth(self.config.token.trim())
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(url = %url, error = %e, "assistant backend request failed");
                BackendError::Transport(e.to_string())
            })?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .unwrap_or_default();
        tracing::debug!(url = %url, status, headers = ?response.headers(), "assistant backend headers");

        let body = response.bytes().await.map_err(|e| {
            tracing::warn!(url = %url, status, error = %e, "failed to read assistant backend body");
            BackendError::Transport(e.to_string())
        })?;
        let raw_body = String::from_utf8_lossy(&body).into_owned();

        tracing::info!(url = %url, status, content_type = %content_type, "assistant backend replied");
        tracing::debug!(body = %body_preview(&raw_body), "assistant backend body");

        Ok(BackendReply {
            status,
            content_type,
            raw_body,
        })
    }
}

fn body_preview(raw: &str) -> String {
    if raw.chars().count() <= BODY_PREVIEW_CHARS {
        return raw.to_string();
    }
    let mut preview: String = raw.chars().take(BODY_PREVIEW_CHARS).collect();
    preview.push_str("...");
    preview
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_into_url_without_query() {
        assert_eq!(
            merge_plant_into_url("https://x/y", "123"),
            "https://x/y?powerstation_id=123"
        );
    }

    #[test]
    fn merge_into_url_with_query() {
        assert_eq!(
            merge_plant_into_url("https://x/y?z=1", "123"),
            "https://x/y?z=1&powerstation_id=123"
        );
    }

    #[test]
    fn merge_empty_plant_keeps_url() {
        assert_eq!(merge_plant_into_url("https://x/y", ""), "https://x/y");
        assert_eq!(merge_plant_into_url("https://x/y?z=1", ""), "https://x/y?z=1");
    }

    #[test]
    fn merge_encodes_plant_id() {
        assert_eq!(
            merge_plant_into_url("https://x/y", "PW 1&2"),
            "https://x/y?powerstation_id=PW+1%262"
        );
    }

    #[test]
    fn new_rejects_bad_configuration() {
        let err = BackendClient::new(BackendConfig::new("not a url", "t")).unwrap_err();
        assert!(matches!(err, AssistantError::Config(_)));

        let config = BackendConfig::new("https://x/y", "t").with_timeout_seconds(0);
        assert!(matches!(
            BackendClient::new(config),
            Err(AssistantError::Config(_))
        ));
    }

    #[test]
    fn preview_is_bounded() {
        let long = "x".repeat(2000);
        let preview = body_preview(&long);
        assert_eq!(preview.len(), BODY_PREVIEW_CHARS + 3);
        assert!(preview.ends_with("..."));
        assert_eq!(body_preview("short"), "short");
    }
}
