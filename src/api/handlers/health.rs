use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::AppState;

/// Liveness plus the two dependencies settlement cannot run without:
/// the database and a configured stats provider. Provider reachability
/// is not probed here; a dead provider surfaces as gateway skips in the
/// batch summary, not as an unhealthy service.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_ok = sqlx::query("SELECT 1").execute(&state.db).await.is_ok();
    let provider_configured =
        !state.config.sports_api_base_url.is_empty() && !state.config.sports_api_key.is_empty();

    let healthy = db_ok && provider_configured;
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "service": "quizsettle",
            "status": if healthy { "healthy" } else { "unhealthy" },
            "db": if db_ok { "connected" } else { "disconnected" },
            "provider": if provider_configured { "configured" } else { "unconfigured" },
        })),
    )
}
