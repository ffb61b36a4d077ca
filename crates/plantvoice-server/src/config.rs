//! Server configuration loading from file and environment variables.

use plantvoice_assistant::{AnswerPolicy, BackendConfig, SkillConfig};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Conversational backend settings.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Voice skill identity.
    #[serde(default)]
    pub skill: SkillConfig,

    /// Answer extraction policy.
    #[serde(default)]
    pub answer: AnswerPolicy,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "plantvoice_assistant=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `PLANTVOICE_HOST` overrides `server.host`
/// - `PLANTVOICE_PORT` overrides `server.port`
/// - `PLANTVOICE_LOG_LEVEL` overrides `logging.level`
/// - `PLANTVOICE_LOG_JSON` overrides `logging.json` (set to "true" to enable)
/// - `PLANTVOICE_BACKEND_URL` overrides `backend.url`
/// - `PLANTVOICE_BACKEND_TIMEOUT` overrides `backend.timeout_seconds`
/// - `PLANTVOICE_ASSIST_TOKEN` overrides `backend.token`
/// - `PLANTVOICE_PLANT_ID` overrides `backend.default_plant_id`
/// - `PLANTVOICE_SKILL_ID` overrides `skill.application_id`
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Same as [`load_config`], reading overrides through `env` instead of the
/// process environment.
pub fn load_config_with_env(
    path: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    // Environment variable overrides
    if let Some(host) = env("PLANTVOICE_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Some(port) = env("PLANTVOICE_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Some(level) = env("PLANTVOICE_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = env("PLANTVOICE_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
    if let Some(url) = env("PLANTVOICE_BACKEND_URL") {
        config.backend.url = url;
    }
    if let Some(timeout) = env("PLANTVOICE_BACKEND_TIMEOUT") {
        if let Ok(parsed) = timeout.trim().parse() {
            config.backend.timeout_seconds = parsed;
        }
    }
    if let Some(token) = env("PLANTVOICE_ASSIST_TOKEN") {
        config.backend.token = token.trim().to_string();
    }
    if let Some(plant) = env("PLANTVOICE_PLANT_ID") {
        config.backend.default_plant_id = plant.trim().to_string();
    }
    if let Some(skill_id) = env("PLANTVOICE_SKILL_ID") {
        config.skill.application_id = skill_id.trim().to_string();
    }

    Ok(config)
}
