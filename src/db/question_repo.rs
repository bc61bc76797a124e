use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;

use crate::models::{PendingFutureQuestion, QuestionKind};

const FUTURE_KINDS: &str = "('future_1x2', 'future_score', 'future_yellow_cards', 'future_corners')";

#[derive(sqlx::FromRow)]
struct PendingRow {
    question_id: i64,
    quiz_id: i64,
    kind: String,
    match_id: i64,
    external_match_id: Option<String>,
    home_team: String,
    away_team: String,
    kickoff_at: DateTime<Utc>,
    match_status: String,
}

/// All unresolved future questions joined to their match rows, ordered
/// by match so batch runs are reproducible.
pub async fn pending_future_questions(pool: &PgPool) -> anyhow::Result<Vec<PendingFutureQuestion>> {
    let sql = format!(
        r#"
        SELECT q.id AS question_id, q.quiz_id, q.kind, m.id AS match_id,
               m.external_id AS external_match_id, m.home_team, m.away_team,
               m.kickoff_at, m.status AS match_status
        FROM quiz_questions q
        JOIN matches m ON m.id = q.match_id
        WHERE q.correct IS NULL
          AND q.kind IN {FUTURE_KINDS}
        ORDER BY m.id, q.ordinal, q.id
        "#
    );

    let rows = sqlx::query_as::<_, PendingRow>(&sql).fetch_all(pool).await?;

    Ok(rows
        .into_iter()
        .filter_map(|row| {
            let Some(kind) = QuestionKind::from_db_str(&row.kind) else {
                tracing::warn!(question_id = row.question_id, kind = %row.kind, "Unknown question kind");
                return None;
            };
            Some(PendingFutureQuestion {
                question_id: row.question_id,
                quiz_id: row.quiz_id,
                kind,
                match_id: row.match_id,
                external_match_id: row.external_match_id,
                home_team: row.home_team,
                away_team: row.away_team,
                kickoff_at: row.kickoff_at,
                match_status: row.match_status,
            })
        })
        .collect())
}

/// Set a question's answer. The `correct IS NULL` guard makes the write
/// null-to-value only; returns false when the guard filtered the row out.
pub async fn record_correct_answer(
    pool: &PgPool,
    question_id: i64,
    correct: &Value,
) -> anyhow::Result<bool> {
    let result = sqlx::query(
        "UPDATE quiz_questions SET correct = $2 WHERE id = $1 AND correct IS NULL",
    )
    .bind(question_id)
    .bind(correct)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Unresolved future questions scoped to one quiz.
pub async fn count_pending_for_quiz(pool: &PgPool, quiz_id: i64) -> anyhow::Result<i64> {
    let sql = format!(
        "SELECT COUNT(*) FROM quiz_questions WHERE quiz_id = $1 AND correct IS NULL AND kind IN {FUTURE_KINDS}"
    );

    let (count,): (i64,) = sqlx::query_as(&sql).bind(quiz_id).fetch_one(pool).await?;

    Ok(count)
}
