//! Typed view of a model-generated schedule.
//!
//! The generation pipeline stores schedules as opaque JSON strings because the
//! model decides the shape. This module classifies a decoded JSON object into
//! one of three tags so consumers never have to destructure an untyped blob:
//!
//! - a single day: `{"08:00": "Warm-up", "09:00": "Read chapter 3"}`
//! - several days: `{"Day 1": {"topics": [...], "timeSlots": {...}}, ...}`
//! - the failure placeholder: `{"message": "...", "schedule": {}}`
//!
//! The placeholder check always runs first.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

use crate::error::CoreError;

/// Keys under which a day object may carry its time slots, in lookup order.
const DAY_SLOT_KEYS: [&str; 3] = ["timeSlots", "time_slots", "schedule"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum GeneratedSchedule {
    SingleDay { slots: Vec<TimeSlot> },
    MultiDay { days: Vec<DayPlan> },
    Failure { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DayPlan {
    /// Day label as emitted by the model, e.g. `"Day 1"`.
    pub label: String,
    pub topics: Vec<String>,
    pub slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TimeSlot {
    /// Time of day, `HH:MM` when the model follows instructions.
    pub time: String,
    pub activity: String,
}

impl GeneratedSchedule {
    /// Classify a decoded JSON object. Total: every object maps to a tag.
    ///
    /// An object carrying a `message` key is a failure placeholder. A
    /// non-empty object whose values are all objects is a multi-day plan.
    /// Anything else is read as a flat single-day mapping.
    pub fn classify(object: &Map<String, Value>) -> Self {
        if let Some(message) = object.get("message") {
            return Self::Failure {
                message: value_text(message),
            };
        }

        if !object.is_empty() && object.values().all(Value::is_object) {
            let days = object
                .iter()
                .filter_map(|(label, day)| day.as_object().map(|d| DayPlan::from_object(label, d)))
                .collect();
            return Self::MultiDay { days };
        }

        Self::SingleDay {
            slots: slots_from(object.iter()),
        }
    }

    /// Decode a serialized schedule and classify it.
    ///
    /// Fails only if the string is not a JSON object.
    pub fn from_json(serialized: &str) -> Result<Self, CoreError> {
        let object: Map<String, Value> = serde_json::from_str(serialized)?;
        Ok(Self::classify(&object))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// Number of days covered: 1 for single-day schedules, 0 for failures.
    pub fn day_count(&self) -> usize {
        match self {
            Self::SingleDay { .. } => 1,
            Self::MultiDay { days } => days.len(),
            Self::Failure { .. } => 0,
        }
    }
}

impl DayPlan {
    fn from_object(label: &str, day: &Map<String, Value>) -> Self {
        let topics = match day.get("topics") {
            Some(Value::Array(items)) => items.iter().map(value_text).collect(),
            Some(other) => vec![value_text(other)],
            None => Vec::new(),
        };

        let slots = match DAY_SLOT_KEYS
            .iter()
            .find_map(|key| day.get(*key).and_then(Value::as_object))
        {
            Some(slots) => slots_from(slots.iter()),
            // No nested slot object: the day's own entries are the slots.
            None => slots_from(day.iter().filter(|(k, _)| k.as_str() != "topics")),
        };

        Self {
            label: label.to_string(),
            topics,
            slots,
        }
    }
}

fn slots_from<'a>(entries: impl Iterator<Item = (&'a String, &'a Value)>) -> Vec<TimeSlot> {
    entries
        .map(|(time, activity)| TimeSlot {
            time: time.clone(),
            activity: value_text(activity),
        })
        .collect()
}

/// Strings verbatim, anything else as its JSON text.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_str(json: &str) -> GeneratedSchedule {
        GeneratedSchedule::from_json(json).unwrap()
    }

    #[test]
    fn placeholder_wins_over_structure() {
        let schedule = classify_str(r#"{"message":"Failed to generate schedule","schedule":{}}"#);
        assert_eq!(
            schedule,
            GeneratedSchedule::Failure {
                message: "Failed to generate schedule".to_string()
            }
        );
        assert!(schedule.is_failure());
        assert_eq!(schedule.day_count(), 0);
    }

    #[test]
    fn flat_mapping_is_single_day() {
        let schedule = classify_str(r#"{"09:00":"Study","07:00":"Wake up"}"#);
        let GeneratedSchedule::SingleDay { slots } = schedule else {
            panic!("expected single day");
        };
        // Model order is kept, not sorted.
        assert_eq!(slots[0].time, "09:00");
        assert_eq!(slots[0].activity, "Study");
        assert_eq!(slots[1].time, "07:00");
    }

    #[test]
    fn nested_days_are_multi_day() {
        let schedule = classify_str(
            r#"{
                "Day 1": {"topics": ["Ownership"], "timeSlots": {"08:00": "Read"}},
                "Day 2": {"topics": ["Borrowing", "Lifetimes"], "schedule": {"09:00": "Practice"}}
            }"#,
        );
        let GeneratedSchedule::MultiDay { days } = schedule else {
            panic!("expected multi day");
        };
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].label, "Day 1");
        assert_eq!(days[0].topics, vec!["Ownership"]);
        assert_eq!(days[0].slots[0].activity, "Read");
        assert_eq!(days[1].topics.len(), 2);
        assert_eq!(days[1].slots[0].time, "09:00");
    }

    #[test]
    fn day_without_slot_object_uses_own_entries() {
        let schedule = classify_str(r#"{"Day 1": {"topics": ["A"], "10:00": "Review"}}"#);
        let GeneratedSchedule::MultiDay { days } = schedule else {
            panic!("expected multi day");
        };
        assert_eq!(days[0].slots.len(), 1);
        assert_eq!(days[0].slots[0].time, "10:00");
    }

    #[test]
    fn non_string_activity_rendered_as_json() {
        let schedule = classify_str(r#"{"09:00": 42}"#);
        let GeneratedSchedule::SingleDay { slots } = schedule else {
            panic!("expected single day");
        };
        assert_eq!(slots[0].activity, "42");
    }

    #[test]
    fn empty_object_is_empty_single_day() {
        assert_eq!(
            classify_str("{}"),
            GeneratedSchedule::SingleDay { slots: vec![] }
        );
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(GeneratedSchedule::from_json("[1,2]").is_err());
        assert!(GeneratedSchedule::from_json("not json").is_err());
    }
}
