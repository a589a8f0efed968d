use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Structured input for schedule generation. Ephemeral: built per call and
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ScheduleRequest {
    /// 24-hour `HH:MM`.
    pub wake_up_time: String,
    /// 24-hour `HH:MM`.
    pub sleep_time: String,
    #[serde(default)]
    pub preferences: Vec<String>,
    #[serde(default)]
    pub goal_title: Option<String>,
    #[serde(default)]
    pub goal_description: Option<String>,
    /// ISO date (`YYYY-MM-DD`) or a full ISO timestamp.
    #[serde(default)]
    pub target_date: Option<String>,
}

impl ScheduleRequest {
    /// Check the wake/sleep times and the target date, if any.
    pub fn validate(&self) -> Result<(), CoreError> {
        check_time("wakeUpTime", &self.wake_up_time)?;
        check_time("sleepTime", &self.sleep_time)?;
        self.target()?;
        Ok(())
    }

    /// Calendar date of the target, if one was given.
    pub fn target(&self) -> Result<Option<Date>, CoreError> {
        self.target_date.as_deref().map(parse_calendar_date).transpose()
    }

    /// Number of days the schedule should cover, counting both today and the
    /// target date: `max(1, (target - today) + 1)`.
    ///
    /// `None` when the request has no target date (single-day schedule).
    pub fn day_count(&self, today: Date) -> Result<Option<i64>, CoreError> {
        let Some(target) = self.target()? else {
            return Ok(None);
        };
        let span = today
            .until(target)
            .map_err(|e| CoreError::InvalidDate(e.to_string()))?;
        Ok(Some((i64::from(span.get_days()) + 1).max(1)))
    }
}

/// Accepts `HH:MM` with two-digit hour 00-23 and minute 00-59.
fn check_time(field: &'static str, value: &str) -> Result<(), CoreError> {
    let invalid = || CoreError::InvalidTime {
        field,
        value: value.to_string(),
    };

    let (hour, minute) = value.split_once(':').ok_or_else(invalid)?;
    let two_digits = |s: &str| s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(hour) || !two_digits(minute) {
        return Err(invalid());
    }
    let hour: u8 = hour.parse().map_err(|_| invalid())?;
    let minute: u8 = minute.parse().map_err(|_| invalid())?;
    if hour > 23 || minute > 59 {
        return Err(invalid());
    }
    Ok(())
}

/// Parse the calendar date part of a plain date, an RFC 3339 timestamp
/// (taken in UTC), or a civil datetime.
fn parse_calendar_date(value: &str) -> Result<Date, CoreError> {
    let value = value.trim();
    if let Ok(date) = value.parse::<Date>() {
        return Ok(date);
    }
    if let Ok(ts) = value.parse::<jiff::Timestamp>() {
        return Ok(ts.to_zoned(jiff::tz::TimeZone::UTC).date());
    }
    value
        .parse::<jiff::civil::DateTime>()
        .map(|dt| dt.date())
        .map_err(|_| CoreError::InvalidDate(value.to_string()))
}
