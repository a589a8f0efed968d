use axum::extract::State;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ValidateConceptRequest {
    pub content: String,
}

#[derive(Serialize)]
pub struct ValidateConceptResponse {
    pub message: String,
}

/// Ask the model to check what the user says they learned.
pub async fn validate_concept(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(req): ApiJson<ValidateConceptRequest>,
) -> Result<Json<ValidateConceptResponse>, ApiError> {
    if req.content.trim().is_empty() {
        return Err(ApiError::BadRequest("content must not be empty".to_string()));
    }

    tracing::info!(user_id = user.user_id, "validating concept");
    let message = state.schedules.validate_concept(&req.content).await?;

    Ok(Json(ValidateConceptResponse { message }))
}
