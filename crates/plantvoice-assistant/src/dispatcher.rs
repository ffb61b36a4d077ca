//! Intent routing: from an inbound event to the spoken response.

use crate::answer::{extract_answer, selected_wrong_integration, AnswerPolicy};
use crate::backend::{merge_plant_into_url, BackendClient};
use crate::config::SkillConfig;
use crate::error::Fault;
use crate::messages;
use crate::plant::resolve_plant;
use plantvoice_types::{IntentEvent, RequestType, SpokenResponse};

/// Intent that forwards the user's question to the backend.
pub const ROUTE_INTENT: &str = "RouteIntent";
pub const HELP_INTENT: &str = "AMAZON.HelpIntent";
pub const FALLBACK_INTENT: &str = "AMAZON.FallbackIntent";

/// Slot holding the user's free-text question.
pub const QUERY_SLOT: &str = "query";
/// Optional slot holding a spoken plant identifier.
pub const PLANT_SLOT: &str = "planta";

/// What a `RouteIntent` asks about, once slots and configuration are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedQuery {
    pub user_query: String,
    /// Never empty; an undetermined plant is reported as [`Fault::MissingPlant`].
    pub plant_id: String,
}

/// Resolves the question and plant for a `RouteIntent`.
///
/// Fails with [`Fault::MissingQuery`] before looking at the plant, so a
/// missing question is always reported first.
pub fn resolve_query(
    event: &IntentEvent,
    default_plant: Option<&str>,
) -> Result<ResolvedQuery, Fault> {
    let user_query = event
        .slot(QUERY_SLOT)
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or(Fault::MissingQuery)?
        .to_string();

    let plant_id = resolve_plant(event.slot(PLANT_SLOT), default_plant);
    if plant_id.is_empty() {
        return Err(Fault::MissingPlant);
    }

    Ok(ResolvedQuery {
        user_query,
        plant_id,
    })
}

/// The voice skill: dispatches events and talks to the backend.
///
/// Holds only immutable configuration and a reusable HTTP client, so one
/// instance serves every request.
#[derive(Debug, Clone)]
pub struct Assistant {
    backend: BackendClient,
    skill: SkillConfig,
    answer_policy: AnswerPolicy,
}

impl Assistant {
    pub fn new(backend: BackendClient, skill: SkillConfig, answer_policy: AnswerPolicy) -> Self {
        Self {
            backend,
            skill,
            answer_policy,
        }
    }

    pub fn backend(&self) -> &BackendClient {
        &self.backend
    }

    /// Produces the response for `event`. Never fails.
    ///
    /// Every [`Fault`] raised while dispatching is logged and converted into
    /// its spoken form here. The event's session attributes are handed back
    /// unchanged.
    pub async fn handle(&self, event: &IntentEvent) -> SpokenResponse {
        let spoken = match self.dispatch(event).await {
            Ok(spoken) => spoken,
            Err(fault) => {
                if fault.is_recoverable() {
                    tracing::info!(
                        request_type = event.request_type.as_str(),
                        fault = %fault,
                        "asking user to clarify"
                    );
                } else {
                    tracing::warn!(
                        request_type = event.request_type.as_str(),
                        intent = event.intent_name.as_deref().unwrap_or("<none>"),
                        fault = %fault,
                        "request failed"
                    );
                }
                fault.into_spoken()
            }
        };
        spoken.with_session_attributes(event.session_attributes.clone())
    }

    /// Routes `event` by request type and intent name.
    pub async fn dispatch(&self, event: &IntentEvent) -> Result<SpokenResponse, Fault> {
        self.check_application(event)?;

        match &event.request_type {
            RequestType::Launch => Ok(SpokenResponse::ask(
                messages::LAUNCH,
                messages::LAUNCH_REPROMPT,
            )),
            RequestType::Intent => {
                let intent = event.intent_name.as_deref().ok_or_else(|| {
                    Fault::MalformedEvent("intent request without intent name".to_string())
                })?;
                match intent {
                    ROUTE_INTENT => self.route(event).await,
                    HELP_INTENT | FALLBACK_INTENT => Ok(rephrase()),
                    other => {
                        tracing::debug!(intent = other, "unrecognized intent");
                        Ok(rephrase())
                    }
                }
            }
            RequestType::SessionEnded => Ok(SpokenResponse::end(messages::FAREWELL)),
            RequestType::Other(raw) => Err(Fault::UnsupportedRequest(raw.clone())),
        }
    }

    fn check_application(&self, event: &IntentEvent) -> Result<(), Fault> {
        let (Some(expected), Some(actual)) = (
            self.skill.expected_application_id(),
            event.application_id.as_deref(),
        ) else {
            return Ok(());
        };
        if expected == actual {
            Ok(())
        } else {
            Err(Fault::UnauthorizedApplication(actual.to_string()))
        }
    }

    /// The `RouteIntent` pipeline: resolve, call, extract.
    async fn route(&self, event: &IntentEvent) -> Result<SpokenResponse, Fault> {
        let config = self.backend.config();
        let query = resolve_query(event, config.default_plant())?;
        let url = merge_plant_into_url(&config.url, &query.plant_id);

        tracing::info!(plant_id = %query.plant_id, "routing question to assistant backend");

        let reply = self.backend.call(&url, &query.user_query, None).await?;
        if !reply.is_ok() {
            return Err(Fault::BackendStatus(reply.status));
        }

        let extraction = extract_answer(&self.answer_policy, &reply.content_type, &reply.raw_body);
        match extraction.answer {
            Some(answer) => Ok(SpokenResponse::end(answer)),
            None if selected_wrong_integration(&extraction.data) => Err(Fault::WrongPlant),
            None => Err(Fault::NoUsefulAnswer),
        }
    }
}

fn rephrase() -> SpokenResponse {
    SpokenResponse::ask(messages::REPHRASE, messages::REPHRASE_REPROMPT)
}
