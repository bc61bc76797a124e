use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::errors::AppError;
use crate::settlement::{self, PgStore, SettlementStore};
use crate::AppState;

/// POST /api/settlement/futures — resolve pending future questions only.
pub async fn run_futures(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let store = PgStore::new(state.db.clone());
    let gateway = state.sports_client();

    let summary = settlement::run_settlement_batch(&store, &gateway).await?;

    Ok(Json(json!({ "ok": true, "summary": summary })))
}

/// POST /api/settlement/auto and POST /cron/auto-settle — full
/// scheduler pass: future-question batch, then deadline-passed quizzes.
pub async fn auto_settle(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let store = PgStore::new(state.db.clone());
    let gateway = state.sports_client();

    let summary =
        settlement::run_auto_settle(&store, &gateway, state.config.settle_buffer_minutes).await?;

    Ok(Json(json!({ "ok": true, "summary": summary })))
}

/// POST /api/quizzes/:id/settle — manual settlement of a single quiz.
/// Refused while the quiz still has unresolved future questions.
pub async fn settle_quiz(
    State(state): State<AppState>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let store = PgStore::new(state.db.clone());

    let pending = store.count_pending_for_quiz(quiz_id).await?;
    if pending > 0 {
        return Err(AppError::PendingFutureQuestions(pending));
    }

    store.settle_quiz(quiz_id).await?;
    tracing::info!(quiz_id, "Quiz settled manually");

    Ok(Json(json!({ "ok": true, "quiz_id": quiz_id, "status": "settled" })))
}
