use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;

/// Header carrying the caller's user id, set by the session layer in front
/// of this service.
pub const USER_ID_HEADER: &str = "x-user-id";

/// User identity middleware.
///
/// Reads the numeric user id from [`USER_ID_HEADER`] and inserts
/// [`AuthUser`] into request extensions for handlers to use. A missing or
/// malformed id is rejected with 401 before any handler runs.
pub async fn require_user(mut req: Request, next: Next) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(USER_ID_HEADER)
        .ok_or_else(|| ApiError::Unauthorized("missing user identity".to_string()))?;

    let user_id = header
        .to_str()
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .ok_or_else(|| ApiError::Unauthorized("invalid user identity".to_string()))?;

    req.extensions_mut().insert(AuthUser { user_id });

    Ok(next.run(req).await)
}

/// Authenticated user, as established by [`require_user`].
#[derive(Clone, Copy, Debug)]
pub struct AuthUser {
    pub user_id: u64,
}
