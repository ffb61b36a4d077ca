use crate::messages;
use plantvoice_types::SpokenResponse;
use thiserror::Error;

/// Errors raised while building the assistant at startup.
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Terminal outcomes of a backend call that produced no HTTP reply.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// No bearer token is configured; no request was attempted.
    #[error("assistant token is not configured")]
    MissingCredential,

    /// Connection, DNS, timeout, or body read failure.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Everything that can stop the pipeline from speaking a backend answer.
///
/// Each variant maps to exactly one spoken response through
/// [`Fault::into_spoken`]; the dispatcher folds every `Err` through it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    #[error("no usable query slot")]
    MissingQuery,

    #[error("no plant identifier could be resolved")]
    MissingPlant,

    #[error("backend call failed: {0}")]
    Backend(#[from] BackendError),

    #[error("backend answered with status {0}")]
    BackendStatus(u16),

    #[error("backend reply carried no usable answer")]
    NoUsefulAnswer,

    #[error("backend routed the question to a device integration")]
    WrongPlant,

    #[error("event from unexpected application: {0}")]
    UnauthorizedApplication(String),

    #[error("unsupported request type: {0:?}")]
    UnsupportedRequest(String),

    #[error("malformed event: {0}")]
    MalformedEvent(String),
}

impl Fault {
    /// Faults the user can fix by answering again; the session stays open.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::MissingQuery | Self::MissingPlant)
    }

    pub fn into_spoken(self) -> SpokenResponse {
        match self {
            Self::MissingQuery => {
                SpokenResponse::ask(messages::MISSING_QUERY, messages::MISSING_QUERY_REPROMPT)
            }
            Self::MissingPlant => {
                SpokenResponse::ask(messages::MISSING_PLANT, messages::MISSING_PLANT_REPROMPT)
            }
            Self::Backend(BackendError::MissingCredential) => SpokenResponse::end(
                messages::service_status(messages::MISSING_CREDENTIAL_STATUS),
            ),
            Self::Backend(BackendError::Transport(_)) => {
                SpokenResponse::end(messages::SERVICE_UNREACHABLE)
            }
            Self::BackendStatus(status) => SpokenResponse::end(messages::service_status(status)),
            Self::NoUsefulAnswer => SpokenResponse::end(messages::NO_USEFUL_ANSWER),
            Self::WrongPlant => SpokenResponse::end(messages::WRONG_PLANT),
            Self::UnauthorizedApplication(_) => {
                SpokenResponse::end(messages::UNAUTHORIZED_APPLICATION)
            }
            Self::UnsupportedRequest(_) => SpokenResponse::end(messages::UNSUPPORTED_REQUEST),
            Self::MalformedEvent(_) => SpokenResponse::end(messages::APOLOGY),
        }
    }
}
