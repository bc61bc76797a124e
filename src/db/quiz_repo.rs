use sqlx::PgPool;

/// Invoke the scoring procedure for one quiz. The procedure computes
/// scores and prizes; this service only triggers it.
pub async fn settle_quiz(pool: &PgPool, quiz_id: i64) -> anyhow::Result<()> {
    sqlx::query("SELECT settle_quiz($1)")
        .bind(quiz_id)
        .execute(pool)
        .await?;

    Ok(())
}
