use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Serialize;

use studyplan_core::models::generated::GeneratedSchedule;
use studyplan_core::models::schedule::Schedule;
use studyplan_core::models::schedule_request::ScheduleRequest;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// A stored schedule plus its typed view.
///
/// `schedule` is the raw stored string; `parsed` is tagged by `kind`, so a
/// degraded result arrives as `{"kind": "failure", "message": ...}` and is
/// never mistaken for a list of time slots. `parsed` is null only if the
/// stored string is not a JSON object.
#[derive(Serialize)]
pub struct ScheduleView {
    #[serde(flatten)]
    pub schedule: Schedule,
    pub parsed: Option<GeneratedSchedule>,
}

impl From<Schedule> for ScheduleView {
    fn from(schedule: Schedule) -> Self {
        let parsed = match schedule.parsed() {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!(id = schedule.id, error = %e, "stored schedule is not a JSON object");
                None
            }
        };
        Self { schedule, parsed }
    }
}

pub async fn list_schedules(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<ScheduleView>>, ApiError> {
    let schedules = state.storage.get_schedules(user.user_id).await?;
    Ok(Json(schedules.into_iter().map(ScheduleView::from).collect()))
}

/// Generate a schedule and persist the serialized result verbatim.
///
/// A degraded result is still stored and returned with 201; only a failed
/// model call is an error.
pub async fn generate_schedule(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(request): ApiJson<ScheduleRequest>,
) -> Result<(StatusCode, Json<ScheduleView>), ApiError> {
    let serialized = state.schedules.generate_schedule(&request).await?;
    let schedule = state.storage.create_schedule(user.user_id, serialized).await?;

    tracing::info!(user_id = user.user_id, schedule_id = schedule.id, "schedule stored");

    Ok((StatusCode::CREATED, Json(ScheduleView::from(schedule))))
}
