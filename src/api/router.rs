use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth::{require_admin, require_cron};
use super::handlers;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Public routes — no authentication required
    let public = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render));

    // Admin-triggered settlement routes
    let admin = Router::new()
        .route("/api/settlement/futures", post(handlers::settlement::run_futures))
        .route("/api/settlement/auto", post(handlers::settlement::auto_settle))
        .route("/api/quizzes/:id/settle", post(handlers::settlement::settle_quiz))
        .layer(middleware::from_fn_with_state(state.clone(), require_admin));

    // Scheduled trigger, authenticated by the static cron secret
    let cron = Router::new()
        .route("/cron/auto-settle", post(handlers::settlement::auto_settle))
        .layer(middleware::from_fn_with_state(state.clone(), require_cron));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(admin)
        .merge(cron)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
