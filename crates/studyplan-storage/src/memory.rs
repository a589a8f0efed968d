use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use studyplan_core::models::goal::{Goal, GoalUpdate, NewGoal};
use studyplan_core::models::learning::{Learning, NewLearning};
use studyplan_core::models::schedule::Schedule;

use crate::Storage;
use crate::error::StorageError;

/// Process-local storage. Contents are lost on restart.
///
/// All record kinds draw ids from one counter, starting at 1.
#[derive(Default)]
pub struct MemStorage {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    goals: BTreeMap<u64, Goal>,
    learnings: BTreeMap<u64, Learning>,
    schedules: BTreeMap<u64, Schedule>,
}

impl Inner {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn get_goals(&self, user_id: u64) -> Result<Vec<Goal>, StorageError> {
        let inner = self.inner.read().await;
        Ok(inner
            .goals
            .values()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_goal(&self, user_id: u64, goal: NewGoal) -> Result<Goal, StorageError> {
        let mut inner = self.inner.write().await;
        let id = inner.allocate_id();
        let goal = Goal::from_new(id, user_id, goal);
        inner.goals.insert(id, goal.clone());
        debug!(id, user_id, "goal created");
        Ok(goal)
    }

    async fn update_goal(&self, id: u64, user_id: u64, update: GoalUpdate) -> Result<Goal, StorageError> {
        let mut inner = self.inner.write().await;
        let goal = inner
            .goals
            .get_mut(&id)
            .filter(|g| g.user_id == user_id)
            .ok_or(StorageError::NotFound { kind: "goal", id })?;
        goal.apply(update);
        Ok(goal.clone())
    }

    async fn get_learnings(&self, user_id: u64) -> Result<Vec<Learning>, StorageError> {
        let inner = self.inner.read().await;
        let mut learnings: Vec<Learning> = inner
            .learnings
            .values()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect();
        learnings.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(learnings)
    }

    async fn create_learning(&self, user_id: u64, learning: NewLearning) -> Result<Learning, StorageError> {
        let mut inner = self.inner.write().await;
        let id = inner.allocate_id();
        let learning = Learning {
            id,
            user_id,
            content: learning.content,
            date: jiff::Timestamp::now(),
        };
        inner.learnings.insert(id, learning.clone());
        debug!(id, user_id, "learning created");
        Ok(learning)
    }

    async fn get_schedules(&self, user_id: u64) -> Result<Vec<Schedule>, StorageError> {
        let inner = self.inner.read().await;
        let mut schedules: Vec<Schedule> = inner
            .schedules
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        schedules.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(schedules)
    }

    async fn create_schedule(&self, user_id: u64, schedule: String) -> Result<Schedule, StorageError> {
        let mut inner = self.inner.write().await;
        let id = inner.allocate_id();
        let schedule = Schedule {
            id,
            user_id,
            date: jiff::Timestamp::now(),
            schedule,
        };
        inner.schedules.insert(id, schedule.clone());
        debug!(id, user_id, len = schedule.schedule.len(), "schedule stored");
        Ok(schedule)
    }
}
