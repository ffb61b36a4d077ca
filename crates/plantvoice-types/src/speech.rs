//! Outbound spoken responses and the platform response envelope.
//!
//! A [`SpokenResponse`] always carries non-empty text that fits within
//! [`MAX_SPEECH_CHARS`]. Both guarantees are applied when the response is
//! built, so nothing downstream has to re-check them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Upper bound on spoken text, in characters, including the truncation marker.
pub const MAX_SPEECH_CHARS: usize = 7900;

/// Appended to text cut at [`MAX_SPEECH_CHARS`].
pub const TRUNCATION_MARKER: char = '…';

/// Spoken when a response would otherwise carry blank text.
pub const EMPTY_TEXT_FALLBACK: &str = "Eu não recebi uma resposta útil agora.";

/// Envelope `version` expected by the voice platform.
pub const ENVELOPE_VERSION: &str = "1.0";

const PLAIN_TEXT: &str = "PlainText";

/// Platform-agnostic speech produced by the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct SpokenResponse {
    text: String,
    should_end_session: bool,
    reprompt_text: Option<String>,
    session_attributes: Map<String, Value>,
}

impl SpokenResponse {
    /// Speaks `text` and closes the session.
    pub fn end(text: impl Into<String>) -> Self {
        Self {
            text: normalize(text.into()),
            should_end_session: true,
            reprompt_text: None,
            session_attributes: Map::new(),
        }
    }

    /// Speaks `text`, keeps the session open, and re-asks with `reprompt` if
    /// the user stays silent.
    pub fn ask(text: impl Into<String>, reprompt: impl Into<String>) -> Self {
        let reprompt = reprompt.into();
        Self {
            text: normalize(text.into()),
            should_end_session: false,
            reprompt_text: (!reprompt.trim().is_empty()).then_some(reprompt),
            session_attributes: Map::new(),
        }
    }

    /// Attaches session attributes to hand back to the platform.
    pub fn with_session_attributes(mut self, attributes: Map<String, Value>) -> Self {
        self.session_attributes = attributes;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn should_end_session(&self) -> bool {
        self.should_end_session
    }

    /// The reprompt, only ever set while the session continues.
    pub fn reprompt_text(&self) -> Option<&str> {
        if self.should_end_session {
            return None;
        }
        self.reprompt_text.as_deref()
    }

    pub fn session_attributes(&self) -> &Map<String, Value> {
        &self.session_attributes
    }

    /// Renders the response in the platform's JSON envelope shape.
    pub fn to_envelope(&self) -> ResponseEnvelope {
        ResponseEnvelope {
            version: ENVELOPE_VERSION.to_string(),
            session_attributes: self.session_attributes.clone(),
            response: ResponseBody {
                output_speech: OutputSpeech::plain(&self.text),
                should_end_session: self.should_end_session,
                reprompt: self.reprompt_text().map(|text| Reprompt {
                    output_speech: OutputSpeech::plain(text),
                }),
            },
        }
    }
}

impl From<SpokenResponse> for ResponseEnvelope {
    fn from(spoken: SpokenResponse) -> Self {
        spoken.to_envelope()
    }
}

/// `{version, sessionAttributes, response}` as posted back to the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    #[serde(default)]
    pub session_attributes: Map<String, Value>,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    pub output_speech: OutputSpeech,
    pub should_end_session: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSpeech {
    /// Always `PlainText`; SSML is not produced.
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl OutputSpeech {
    fn plain(text: &str) -> Self {
        Self {
            kind: PLAIN_TEXT.to_string(),
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

/// Cuts `text` to at most `max_chars` characters, ending in
/// [`TRUNCATION_MARKER`] when anything was dropped.
pub fn truncate_speech(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push(TRUNCATION_MARKER);
    out
}

fn normalize(text: String) -> String {
    if text.trim().is_empty() {
        return EMPTY_TEXT_FALLBACK.to_string();
    }
    truncate_speech(&text, MAX_SPEECH_CHARS)
}
