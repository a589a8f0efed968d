use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};

use studyplan_core::models::goal::{Goal, GoalUpdate, NewGoal};

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub async fn list_goals(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Goal>>, ApiError> {
    let goals = state.storage.get_goals(user.user_id).await?;
    Ok(Json(goals))
}

pub async fn create_goal(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(goal): ApiJson<NewGoal>,
) -> Result<(StatusCode, Json<Goal>), ApiError> {
    if goal.title.trim().is_empty() {
        return Err(ApiError::BadRequest("goal title must not be empty".to_string()));
    }
    let goal = state.storage.create_goal(user.user_id, goal).await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

/// Partial update; typically toggles `completed`. Goals are never deleted.
pub async fn update_goal(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath(id): ApiPath<u64>,
    ApiJson(update): ApiJson<GoalUpdate>,
) -> Result<Json<Goal>, ApiError> {
    let goal = state.storage.update_goal(id, user.user_id, update).await?;
    Ok(Json(goal))
}
