//! Turning a backend reply into speakable text.
//!
//! The backend is expected to answer `{"answer": "..."}`, but older
//! deployments and error paths use other shapes. Extraction walks a fixed
//! priority list and gives up with `None` rather than guessing; the caller
//! substitutes a safety-net message.

use crate::messages;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Canonical answer field of the backend reply.
pub const ANSWER_FIELD: &str = "answer";

fn default_fallback_fields() -> Vec<String> {
    ["resposta", "message", "output", "text"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Alternate reply fields consulted, in order, when `answer` is missing.
///
/// Not exhaustive: deployments with other reply shapes add fields through
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerPolicy {
    #[serde(default = "default_fallback_fields")]
    pub fallback_fields: Vec<String>,
}

impl Default for AnswerPolicy {
    fn default() -> Self {
        Self {
            fallback_fields: default_fallback_fields(),
        }
    }
}

/// Result of [`extract_answer`].
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Trimmed, non-blank answer text.
    pub answer: Option<String>,
    /// Parsed JSON reply; an empty object for non-JSON or unparseable bodies.
    pub data: Value,
}

/// True for `application/json` and any `+json` media type, parameters ignored.
pub fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

pub fn extract_answer(policy: &AnswerPolicy, content_type: &str, raw_body: &str) -> Extraction {
    if !is_json_content_type(content_type) {
        return Extraction {
            answer: non_blank(raw_body),
            data: Value::Object(Map::new()),
        };
    }

    let data = match serde_json::from_str::<Value>(raw_body) {
        Ok(value @ Value::Object(_)) => value,
        Ok(_) | Err(_) => Value::Object(Map::new()),
    };

    let answer = std::iter::once(ANSWER_FIELD)
        .chain(policy.fallback_fields.iter().map(String::as_str))
        .find_map(|field| data.get(field).and_then(Value::as_str).and_then(non_blank))
        .or_else(|| reported_error(&data));

    Extraction { answer, data }
}

/// `{"ok": false, "error": "<message>"}` becomes "Erro do serviço: <message>".
fn reported_error(data: &Value) -> Option<String> {
    if data.get("ok") != Some(&Value::Bool(false)) {
        return None;
    }
    data.get("error")
        .and_then(Value::as_str)
        .map(messages::service_error)
}

/// Best-effort check for a backend that routed the question to a smart-home
/// device integration instead of the energy domain.
///
/// Looks only at the name of the first entry in `steps`. A false negative
/// costs a less specific error message, nothing more.
pub fn selected_wrong_integration(data: &Value) -> bool {
    let first_step = data
        .get("steps")
        .and_then(Value::as_array)
        .and_then(|steps| steps.first())
        .and_then(|step| step.get("name"))
        .map(step_name)
        .unwrap_or_default()
        .to_lowercase();

    first_step.starts_with("st_") || first_step.contains("smartthings")
}

fn step_name(name: &Value) -> String {
    match name {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
