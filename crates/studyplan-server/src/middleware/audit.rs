use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use super::auth::USER_ID_HEADER;

/// One `access` event per request, including rejected and unmatched ones.
///
/// Runs outside the identity check, so the caller is taken straight from the
/// header and may be absent.
pub async fn access_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let caller = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let started = Instant::now();

    let response = next.run(req).await;
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    tracing::info!(
        %method,
        %path,
        caller = caller.as_deref().unwrap_or("-"),
        status = response.status().as_u16(),
        elapsed_ms,
        "access"
    );

    response
}
