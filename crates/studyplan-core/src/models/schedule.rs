use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::generated::GeneratedSchedule;
use crate::error::CoreError;

/// A persisted schedule. `schedule` holds the serialized JSON returned by the
/// generation pipeline, stored verbatim with no shape enforcement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Schedule {
    pub id: u64,
    pub user_id: u64,
    /// Generation timestamp.
    pub date: jiff::Timestamp,
    pub schedule: String,
}

impl Schedule {
    /// Decode the stored string into its typed view.
    ///
    /// A stored failure placeholder comes back as
    /// [`GeneratedSchedule::Failure`], never as an empty schedule.
    pub fn parsed(&self) -> Result<GeneratedSchedule, CoreError> {
        GeneratedSchedule::from_json(&self.schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(schedule: &str) -> Schedule {
        Schedule {
            id: 3,
            user_id: 1,
            date: jiff::Timestamp::UNIX_EPOCH,
            schedule: schedule.to_string(),
        }
    }

    #[test]
    fn parsed_detects_placeholder() {
        let schedule = stored(r#"{"message":"Failed to generate schedule","schedule":{}}"#);
        assert!(schedule.parsed().unwrap().is_failure());
    }

    #[test]
    fn parsed_reads_single_day() {
        let schedule = stored(r#"{"09:00":"Study"}"#);
        assert_eq!(schedule.parsed().unwrap().day_count(), 1);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(stored("{}")).unwrap();
        assert!(json.get("userId").is_some());
        assert_eq!(json["schedule"], "{}");
    }
}
