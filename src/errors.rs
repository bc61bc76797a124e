use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No credentials presented.
    #[error("Unauthorized")]
    Unauthorized,

    /// Credentials presented but wrong.
    #[error("Not authorized")]
    NotAuthorized,

    /// The server-side secret for this surface is not configured.
    #[error("Service key missing")]
    ServiceKeyMissing,

    /// Manual settlement refused: the quiz still has unresolved future questions.
    #[error("{0} future questions still pending")]
    PendingFutureQuestions(i64),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code callers branch on.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "unauthorized",
            AppError::NotAuthorized => "not_authorized",
            AppError::ServiceKeyMissing => "service_key_missing",
            AppError::PendingFutureQuestions(_) => "pending_future_questions",
            AppError::Internal(_) => "internal",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    ok: bool,
    error: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotAuthorized => StatusCode::FORBIDDEN,
            AppError::ServiceKeyMissing => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::PendingFutureQuestions(_) => StatusCode::CONFLICT,
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = match &self {
            AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        (
            status,
            Json(ErrorBody {
                ok: false,
                error: self.code(),
                message,
            }),
        )
            .into_response()
    }
}
