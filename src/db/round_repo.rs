use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::{DueQuiz, RoundStatus};

/// Quizzes of rounds past the deadline threshold that are neither
/// settled nor mid-claim.
pub async fn due_quizzes(pool: &PgPool, threshold: DateTime<Utc>) -> anyhow::Result<Vec<DueQuiz>> {
    let rows = sqlx::query_as::<_, DueQuiz>(
        r#"
        SELECT z.id AS quiz_id, r.id AS round_id, r.deadline_at
        FROM rounds r
        JOIN quizzes z ON z.round_id = r.id
        WHERE r.deadline_at <= $1
          AND r.status NOT IN ('settled', 'settling')
        ORDER BY r.id, z.id
        "#,
    )
    .bind(threshold)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Conditional move to `settling`. Zero rows means another invocation
/// got there first or the round is already settled.
pub async fn claim_round(pool: &PgPool, round_id: i64) -> anyhow::Result<bool> {
    let result = sqlx::query(
        "UPDATE rounds SET status = $2 WHERE id = $1 AND status NOT IN ('settled', 'settling')",
    )
    .bind(round_id)
    .bind(RoundStatus::Settling.as_str())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Return a claimed round to `locked` so the next run retries it.
pub async fn release_round(pool: &PgPool, round_id: i64) -> anyhow::Result<()> {
    sqlx::query("UPDATE rounds SET status = $2 WHERE id = $1 AND status = 'settling'")
        .bind(round_id)
        .bind(RoundStatus::Locked.as_str())
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn mark_round_settled(pool: &PgPool, round_id: i64) -> anyhow::Result<()> {
    sqlx::query("UPDATE rounds SET status = $2 WHERE id = $1")
        .bind(round_id)
        .bind(RoundStatus::Settled.as_str())
        .execute(pool)
        .await?;

    Ok(())
}
