use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, patch, post};
use tower_http::cors::{Any, CorsLayer};

use crate::middleware;
use crate::routes;
use crate::state::AppState;

/// Assemble the HTTP surface. `/health` is open; everything under `/api`
/// requires a user identity.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route(
            "/api/goals",
            get(routes::goals::list_goals).post(routes::goals::create_goal),
        )
        .route("/api/goals/{id}", patch(routes::goals::update_goal))
        .route(
            "/api/learnings",
            get(routes::learnings::list_learnings).post(routes::learnings::create_learning),
        )
        .route("/api/schedules", get(routes::schedules::list_schedules))
        .route(
            "/api/schedules/generate",
            post(routes::schedules::generate_schedule),
        )
        .route(
            "/api/validate-concept",
            post(routes::concepts::validate_concept),
        )
        .route_layer(axum_mw::from_fn(middleware::auth::require_user));

    Router::new()
        // Health (no auth)
        .route("/health", get(routes::health::health_check))
        .merge(api)
        .layer(axum_mw::from_fn(middleware::audit::access_log))
        .layer(cors)
        .with_state(state)
}
