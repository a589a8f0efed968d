use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid time of day {value:?} for {field}: expected 24-hour HH:MM")]
    InvalidTime { field: &'static str, value: String },

    #[error("invalid target date {0:?}")]
    InvalidDate(String),
}
