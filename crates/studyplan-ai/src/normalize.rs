//! Recovery of a JSON schedule from raw model output.
//!
//! Models asked for "only JSON" still wrap it in prose or code fences, or
//! give up entirely. [`normalize`] is total and walks a three-tier ladder:
//!
//! 1. **Strict**: the whole text decodes as a JSON object.
//! 2. **Extracted**: the span from the first `{` to the last `}` decodes as a
//!    JSON object.
//! 3. **Fallback**: the canonical failure placeholder
//!    `{"message":"Failed to generate schedule","schedule":{}}`.
//!
//! Tier 2 is a heuristic, not a parser. When the text holds two separate
//! `{...}` blocks the span covers both and usually fails to decode, landing
//! in tier 3. That span rule is kept as is for compatibility with schedules
//! already stored.
//!
//! A decoded value that is not an object (array, string, number) is a tier-3
//! result: a schedule is always an object.

use serde_json::{Map, Value, json};
use studyplan_core::models::generated::GeneratedSchedule;
use tracing::{debug, warn};

pub const FAILURE_MESSAGE: &str = "Failed to generate schedule";

/// Which rung of the recovery ladder produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryTier {
    Strict,
    Extracted,
    Fallback,
}

/// Output of [`normalize`]: the canonical serialized JSON that gets
/// persisted, and its classified view.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSchedule {
    /// Compact JSON, key order as emitted by the model.
    pub serialized: String,
    pub schedule: GeneratedSchedule,
    pub tier: RecoveryTier,
}

impl NormalizedSchedule {
    /// True for the tier-3 placeholder and for model output that is itself
    /// a `message` object. Either way there is no schedule to show.
    pub fn is_degraded(&self) -> bool {
        self.schedule.is_failure()
    }
}

/// Normalize raw model text into a canonical schedule. Never fails.
pub fn normalize(raw: &str) -> NormalizedSchedule {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(object)) => return canonical(object, RecoveryTier::Strict),
        Ok(other) => {
            warn!(kind = json_kind(&other), "model output is valid JSON but not an object");
            return fallback();
        }
        Err(e) => debug!(error = %e, "strict decode failed, trying brace extraction"),
    }

    if let Some(candidate) = extract_outer_braces(raw) {
        match serde_json::from_str::<Value>(candidate) {
            Ok(Value::Object(object)) => return canonical(object, RecoveryTier::Extracted),
            Ok(_) => {}
            Err(e) => debug!(error = %e, "extracted span is not valid JSON"),
        }
    }

    warn!(raw_len = raw.len(), "could not recover a schedule from model output");
    fallback()
}

/// [`normalize`], keeping only the serialized form.
pub fn normalize_to_string(raw: &str) -> String {
    normalize(raw).serialized
}

/// The substring from the first `{` through the last `}`, if that span is
/// non-empty and correctly ordered.
pub fn extract_outer_braces(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (start < end).then(|| &raw[start..=end])
}

/// `{"message": "Failed to generate schedule", "schedule": {}}`
pub fn failure_placeholder() -> Value {
    json!({
        "message": FAILURE_MESSAGE,
        "schedule": {},
    })
}

fn canonical(object: Map<String, Value>, tier: RecoveryTier) -> NormalizedSchedule {
    let schedule = GeneratedSchedule::classify(&object);
    NormalizedSchedule {
        serialized: Value::Object(object).to_string(),
        schedule,
        tier,
    }
}

fn fallback() -> NormalizedSchedule {
    NormalizedSchedule {
        serialized: failure_placeholder().to_string(),
        schedule: GeneratedSchedule::Failure {
            message: FAILURE_MESSAGE.to_string(),
        },
        tier: RecoveryTier::Fallback,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
