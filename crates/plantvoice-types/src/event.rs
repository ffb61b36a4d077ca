//! Inbound intent events from the voice platform.
//!
//! The platform posts a JSON envelope shaped like
//! `{"session": {...}, "context": {...}, "request": {"type": ..., "intent": {"name": ..., "slots": {...}}}}`.
//! Any part of it may be missing or carry the wrong JSON type, so every
//! accessor here walks the tree with `Value::get` and degrades to `None`.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Top-level request kinds understood by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestType {
    /// The user opened the skill without a question.
    Launch,
    /// The user said something the platform classified as an intent.
    Intent,
    /// The platform closed the session.
    SessionEnded,
    /// Anything else, including an absent `request.type` (empty string).
    Other(String),
}

impl Default for RequestType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl RequestType {
    /// Maps the platform's `request.type` string to a request kind.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "LaunchRequest" => Self::Launch,
            "IntentRequest" => Self::Intent,
            "SessionEndedRequest" => Self::SessionEnded,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the wire name of this request kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Launch => "LaunchRequest",
            Self::Intent => "IntentRequest",
            Self::SessionEnded => "SessionEndedRequest",
            Self::Other(raw) => raw,
        }
    }
}

/// A parsed inbound event.
///
/// Construction never fails: use [`IntentEvent::from_value`] or deserialize
/// it straight from any JSON document.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "Value")]
pub struct IntentEvent {
    pub request_type: RequestType,
    /// Present only for intent requests that carry a string `intent.name`.
    pub intent_name: Option<String>,
    /// Slot name to spoken value. Slots without a string `value` are dropped.
    pub slots: BTreeMap<String, String>,
    /// `session.attributes`, carried back to the platform untouched.
    pub session_attributes: Map<String, Value>,
    /// Skill application id, from the session or the system context.
    pub application_id: Option<String>,
}

impl IntentEvent {
    pub fn from_value(value: &Value) -> Self {
        let request = value.get("request");

        let request_type = request
            .and_then(|r| r.get("type"))
            .and_then(Value::as_str)
            .map(RequestType::parse)
            .unwrap_or_default();

        let intent = request.and_then(|r| r.get("intent"));
        let intent_name = intent
            .and_then(|i| i.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string);

        let slots = intent
            .and_then(|i| i.get("slots"))
            .and_then(Value::as_object)
            .map(|slots| {
                slots
                    .iter()
                    .filter_map(|(name, slot)| {
                        slot.get("value")
                            .and_then(Value::as_str)
                            .map(|v| (name.clone(), v.to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default();

        let session_attributes = value
            .get("session")
            .and_then(|s| s.get("attributes"))
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        let application_id = value
            .pointer("/session/application/applicationId")
            .or_else(|| value.pointer("/context/System/application/applicationId"))
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        Self {
            request_type,
            intent_name,
            slots,
            session_attributes,
            application_id,
        }
    }

    /// Returns the spoken value of a slot, if the platform filled it in.
    pub fn slot(&self, name: &str) -> Option<&str> {
        self.slots.get(name).map(String::as_str)
    }
}

impl From<Value> for IntentEvent {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}

/// Pulls `request.intent.slots.<slot_name>.value` out of a raw event.
///
/// Returns `None` for every shape of missing structure and for non-string
/// values.
pub fn extract_slot(event: &Value, slot_name: &str) -> Option<String> {
    event
        .get("request")?
        .get("intent")?
        .get("slots")?
        .get(slot_name)?
        .get("value")?
        .as_str()
        .map(str::to_string)
}
