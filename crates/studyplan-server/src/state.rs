use std::sync::Arc;

use studyplan_ai::service::ScheduleService;
use studyplan_storage::Storage;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub schedules: ScheduleService,
}
