use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

fn default_backend_url() -> String {
    "http://127.0.0.1:3000/api/assistant/chat".to_string()
}

fn default_timeout_seconds() -> u64 {
    25
}

fn default_user_agent() -> String {
    "plantvoice/assistant-chat/1.0".to_string()
}

/// Connection settings for the conversational backend.
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Chat endpoint; the plant id is appended as `powerstation_id`.
    #[serde(default = "default_backend_url")]
    pub url: String,
    /// Bound on both connecting and receiving the reply. Default: 25.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Bearer token for the backend. Calls fail fast while this is blank.
    #[serde(default, skip_serializing)]
    pub token: String,
    /// Plant used when the user does not name one.
    #[serde(default)]
    pub default_plant_id: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            timeout_seconds: default_timeout_seconds(),
            token: String::new(),
            default_plant_id: String::new(),
            user_agent: default_user_agent(),
        }
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.token.is_empty() {
            "<unset>"
        } else {
            "[REDACTED]"
        };
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("token", &token)
            .field("default_plant_id", &self.default_plant_id)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: token.into(),
            ..Self::default()
        }
    }

    pub fn with_default_plant(mut self, plant_id: impl Into<String>) -> Self {
        self.default_plant_id = plant_id.into();
        self
    }

    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn has_credential(&self) -> bool {
        !self.token.trim().is_empty()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// The configured default plant, if it is not blank.
    pub fn default_plant(&self) -> Option<&str> {
        Some(self.default_plant_id.trim()).filter(|p| !p.is_empty())
    }
}

/// Identity of the voice skill this service answers for.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillConfig {
    /// When set, events from any other application id are refused.
    #[serde(default)]
    pub application_id: String,
}

impl SkillConfig {
    pub fn expected_application_id(&self) -> Option<&str> {
        Some(self.application_id.trim()).filter(|id| !id.is_empty())
    }
}
