use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::errors::AppError;
use crate::AppState;

/// Bearer-token middleware for admin-triggered settlement routes.
///
/// Distinguishes "no credentials" (401) from "wrong credentials" (403);
/// an unconfigured server-side token is a config error (500) before any
/// work happens.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    check_bearer(&req, state.config.admin_api_token.as_deref())?;
    Ok(next.run(req).await)
}

/// Same scheme for the cron trigger, keyed by the static cron secret
/// instead of the admin token.
pub async fn require_cron(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    check_bearer(&req, state.config.cron_secret.as_deref())?;
    Ok(next.run(req).await)
}

fn check_bearer(req: &Request, expected: Option<&str>) -> Result<(), AppError> {
    let Some(expected) = expected else {
        return Err(AppError::ServiceKeyMissing);
    };

    let header = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok());

    match header.and_then(|v| v.strip_prefix("Bearer ")) {
        Some(token) if token == expected => Ok(()),
        Some(_) => Err(AppError::NotAuthorized),
        None => Err(AppError::Unauthorized),
    }
}
