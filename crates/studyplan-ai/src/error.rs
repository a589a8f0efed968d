use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    /// Missing or unusable provider configuration. Fatal at startup.
    #[error("AI provider configuration error: {0}")]
    Config(String),

    /// Transport or provider error during a model call.
    #[error("text generation failed: {0}")]
    Generation(String),

    #[error("schedule generation failed: {0}")]
    ScheduleGeneration(String),

    #[error("concept validation failed: {0}")]
    ConceptValidation(String),

    #[error("invalid schedule request: {0}")]
    InvalidRequest(#[from] studyplan_core::error::CoreError),
}

impl AiError {
    /// The underlying provider or transport message, without the variant
    /// prefix.
    pub fn provider_message(&self) -> Option<&str> {
        match self {
            Self::Generation(msg) | Self::ScheduleGeneration(msg) | Self::ConceptValidation(msg) => {
                Some(msg.as_str())
            }
            _ => None,
        }
    }
}
