use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A learning goal owned by a single user.
///
/// Goals are only ever created and updated (mostly to toggle `completed`);
/// the application never deletes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Goal {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub description: String,
    pub target_date: jiff::Timestamp,
    pub completed: bool,
    /// Optional SMART breakdown of the goal.
    #[serde(default)]
    pub specific: Option<String>,
    #[serde(default)]
    pub measurable: Option<String>,
    #[serde(default)]
    pub achievable: Option<String>,
    #[serde(default)]
    pub relevant: Option<String>,
}

/// Payload for creating a goal. The id and owner are assigned by storage.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewGoal {
    pub title: String,
    pub description: String,
    pub target_date: jiff::Timestamp,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub specific: Option<String>,
    #[serde(default)]
    pub measurable: Option<String>,
    #[serde(default)]
    pub achievable: Option<String>,
    #[serde(default)]
    pub relevant: Option<String>,
}

/// Partial update of a goal. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GoalUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub target_date: Option<jiff::Timestamp>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub specific: Option<String>,
    #[serde(default)]
    pub measurable: Option<String>,
    #[serde(default)]
    pub achievable: Option<String>,
    #[serde(default)]
    pub relevant: Option<String>,
}

impl Goal {
    pub fn from_new(id: u64, user_id: u64, new: NewGoal) -> Self {
        Self {
            id,
            user_id,
            title: new.title,
            description: new.description,
            target_date: new.target_date,
            completed: new.completed,
            specific: new.specific,
            measurable: new.measurable,
            achievable: new.achievable,
            relevant: new.relevant,
        }
    }

    /// Merge a partial update into this goal.
    pub fn apply(&mut self, update: GoalUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(target_date) = update.target_date {
            self.target_date = target_date;
        }
        if let Some(completed) = update.completed {
            self.completed = completed;
        }
        if update.specific.is_some() {
            self.specific = update.specific;
        }
        if update.measurable.is_some() {
            self.measurable = update.measurable;
        }
        if update.achievable.is_some() {
            self.achievable = update.achievable;
        }
        if update.relevant.is_some() {
            self.relevant = update.relevant;
        }
    }
}
