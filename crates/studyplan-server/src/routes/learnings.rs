use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};

use studyplan_core::models::learning::{Learning, NewLearning};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub async fn list_learnings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Learning>>, ApiError> {
    let learnings = state.storage.get_learnings(user.user_id).await?;
    Ok(Json(learnings))
}

pub async fn create_learning(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(learning): ApiJson<NewLearning>,
) -> Result<(StatusCode, Json<Learning>), ApiError> {
    if learning.content.trim().is_empty() {
        return Err(ApiError::BadRequest("learning content must not be empty".to_string()));
    }
    let learning = state.storage.create_learning(user.user_id, learning).await?;
    Ok((StatusCode::CREATED, Json(learning)))
}
