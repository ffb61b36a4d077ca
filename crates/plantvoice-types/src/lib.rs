//! Shared wire types for the plantvoice skill.
//!
//! This crate owns both ends of the voice platform contract:
//!
//! - [`IntentEvent`]: the inbound request envelope, parsed leniently so that
//!   missing or malformed structure never turns into an error.
//! - [`SpokenResponse`] and [`ResponseEnvelope`]: the outbound speech,
//!   with the non-empty and length-ceiling guarantees enforced at
//!   construction.
//!
//! Neither side performs I/O. The assistant pipeline in `plantvoice-assistant`
//! and the HTTP surface in `plantvoice-server` both build on these types.

pub mod event;
pub mod speech;

pub use event::{extract_slot, IntentEvent, RequestType};
pub use speech::{
    truncate_speech, OutputSpeech, Reprompt, ResponseBody, ResponseEnvelope, SpokenResponse,
    EMPTY_TEXT_FALLBACK, ENVELOPE_VERSION, MAX_SPEECH_CHARS, TRUNCATION_MARKER,
};
