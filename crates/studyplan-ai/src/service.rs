use std::sync::Arc;

use studyplan_core::models::schedule_request::ScheduleRequest;
use tracing::{info, warn};
use uuid::Uuid;

use crate::client::{GenerationClient, ResponseFormat};
use crate::error::AiError;
use crate::normalize::{self, NormalizedSchedule};
use crate::prompt;

/// Orchestrates prompt building, the model call and normalization.
///
/// Holds no per-call state, so one instance can be cloned into every request
/// handler and used concurrently.
#[derive(Clone)]
pub struct ScheduleService {
    client: Arc<dyn GenerationClient>,
}

impl ScheduleService {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self { client }
    }

    /// Generate a schedule and return its serialized form, ready to be
    /// persisted verbatim.
    pub async fn generate_schedule(&self, request: &ScheduleRequest) -> Result<String, AiError> {
        Ok(self.generate(request).await?.serialized)
    }

    /// Generate a schedule using today's local date for the day count.
    ///
    /// A failed model call is an error. Output that cannot be parsed is not:
    /// it comes back as the degraded placeholder.
    pub async fn generate(&self, request: &ScheduleRequest) -> Result<NormalizedSchedule, AiError> {
        self.generate_for_date(request, jiff::Zoned::now().date()).await
    }

    /// [`Self::generate`] with an explicit "today".
    pub async fn generate_for_date(
        &self,
        request: &ScheduleRequest,
        today: jiff::civil::Date,
    ) -> Result<NormalizedSchedule, AiError> {
        let generation_id = Uuid::new_v4();
        request.validate()?;

        let prompt = prompt::build_schedule_prompt(request, today)?;
        info!(
            generation_id = %generation_id,
            provider = self.client.provider(),
            prompt_len = prompt.len(),
            "starting schedule generation"
        );

        let raw = self
            .client
            .complete(&prompt, ResponseFormat::Json)
            .await
            .map_err(|e| {
                warn!(generation_id = %generation_id, error = %e, "schedule generation failed");
                AiError::ScheduleGeneration(provider_message(e))
            })?;

        let normalized = normalize::normalize(&raw);

        info!(
            generation_id = %generation_id,
            tier = ?normalized.tier,
            days = normalized.schedule.day_count(),
            degraded = normalized.is_degraded(),
            "schedule generation complete"
        );

        Ok(normalized)
    }

    /// Ask the model for feedback on what the learner wrote. The reply is
    /// prose and is returned unmodified.
    pub async fn validate_concept(&self, learning_text: &str) -> Result<String, AiError> {
        let generation_id = Uuid::new_v4();
        info!(
            generation_id = %generation_id,
            provider = self.client.provider(),
            text_len = learning_text.len(),
            "starting concept validation"
        );

        let prompt = prompt::build_concept_prompt(learning_text);
        let feedback = self
            .client
            .complete(&prompt, ResponseFormat::Text)
            .await
            .map_err(|e| {
                warn!(generation_id = %generation_id, error = %e, "concept validation failed");
                AiError::ConceptValidation(provider_message(e))
            })?;

        info!(generation_id = %generation_id, feedback_len = feedback.len(), "concept validation complete");

        Ok(feedback)
    }
}

fn provider_message(e: AiError) -> String {
    match e.provider_message() {
        Some(msg) => msg.to_string(),
        None => e.to_string(),
    }
}
