use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A daily learning entry. The date is stamped by storage on creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Learning {
    pub id: u64,
    pub user_id: u64,
    pub content: String,
    pub date: jiff::Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewLearning {
    pub content: String,
}
