//! studyplan-storage
//!
//! Persistence for goals, learnings and generated schedules behind the
//! [`Storage`] trait, with an in-memory implementation.

pub mod error;
pub mod memory;

use async_trait::async_trait;
use studyplan_core::models::goal::{Goal, GoalUpdate, NewGoal};
use studyplan_core::models::learning::{Learning, NewLearning};
use studyplan_core::models::schedule::Schedule;

use crate::error::StorageError;

pub use memory::MemStorage;

/// Per-user persistence. Every method is scoped to the owning user.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get_goals(&self, user_id: u64) -> Result<Vec<Goal>, StorageError>;

    async fn create_goal(&self, user_id: u64, goal: NewGoal) -> Result<Goal, StorageError>;

    /// Apply a partial update. Fails with `NotFound` when the goal does not
    /// exist or belongs to another user.
    async fn update_goal(&self, id: u64, user_id: u64, update: GoalUpdate) -> Result<Goal, StorageError>;

    /// Newest first.
    async fn get_learnings(&self, user_id: u64) -> Result<Vec<Learning>, StorageError>;

    async fn create_learning(&self, user_id: u64, learning: NewLearning) -> Result<Learning, StorageError>;

    /// Newest first.
    async fn get_schedules(&self, user_id: u64) -> Result<Vec<Schedule>, StorageError>;

    /// Persist a serialized schedule verbatim, stamped with the current time.
    async fn create_schedule(&self, user_id: u64, schedule: String) -> Result<Schedule, StorageError>;
}
