//! Intent routing and answer resolution for the plantvoice skill.
//!
//! A `RouteIntent` travels through slot extraction, plant resolution, a
//! single backend call, and answer extraction before it becomes speech.
//! Every other request kind is answered locally. Failures never escape:
//! [`Assistant::handle`] folds each [`Fault`] into a spoken response.

pub mod answer;
pub mod backend;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod messages;
pub mod plant;

pub use answer::{extract_answer, selected_wrong_integration, AnswerPolicy, Extraction};
pub use backend::{
    merge_plant_into_url, BackendClient, BackendReply, BackendResult, ChatMessage,
    POWERSTATION_PARAM,
};
pub use config::{BackendConfig, SkillConfig};
pub use dispatcher::{resolve_query, Assistant, ResolvedQuery};
pub use error::{AssistantError, BackendError, Fault};
pub use plant::resolve_plant;
