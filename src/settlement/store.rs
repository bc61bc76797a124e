use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::db::{question_repo, quiz_repo, round_repo};
use crate::models::{CorrectAnswer, DueQuiz, PendingFutureQuestion};

/// Storage operations the settlement core needs. Constructed per
/// invocation; tests substitute an in-memory implementation.
#[async_trait]
pub trait SettlementStore: Send + Sync {
    /// All future questions with `correct IS NULL`, joined to their match.
    async fn pending_future_questions(&self) -> anyhow::Result<Vec<PendingFutureQuestion>>;

    /// Write a question's answer. Returns false when the question was
    /// already resolved (the write is null-to-value only).
    async fn record_correct_answer(
        &self,
        question_id: i64,
        correct: &CorrectAnswer,
    ) -> anyhow::Result<bool>;

    /// Pending future questions scoped to one quiz.
    async fn count_pending_for_quiz(&self, quiz_id: i64) -> anyhow::Result<i64>;

    /// Quizzes of rounds past the deadline threshold and not yet settled.
    async fn due_quizzes(&self, threshold: DateTime<Utc>) -> anyhow::Result<Vec<DueQuiz>>;

    /// Move a round into the settling claim state. Returns false when
    /// the round is already settled or claimed by another invocation.
    async fn claim_round(&self, round_id: i64) -> anyhow::Result<bool>;

    /// Drop a claim so the next run retries the round.
    async fn release_round(&self, round_id: i64) -> anyhow::Result<()>;

    async fn mark_round_settled(&self, round_id: i64) -> anyhow::Result<()>;

    /// The black-box scoring procedure.
    async fn settle_quiz(&self, quiz_id: i64) -> anyhow::Result<()>;
}

/// Postgres-backed store, a thin veneer over the repo modules.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettlementStore for PgStore {
    async fn pending_future_questions(&self) -> anyhow::Result<Vec<PendingFutureQuestion>> {
        question_repo::pending_future_questions(&self.pool).await
    }

    async fn record_correct_answer(
        &self,
        question_id: i64,
        correct: &CorrectAnswer,
    ) -> anyhow::Result<bool> {
        question_repo::record_correct_answer(&self.pool, question_id, &correct.to_json()).await
    }

    async fn count_pending_for_quiz(&self, quiz_id: i64) -> anyhow::Result<i64> {
        question_repo::count_pending_for_quiz(&self.pool, quiz_id).await
    }

    async fn due_quizzes(&self, threshold: DateTime<Utc>) -> anyhow::Result<Vec<DueQuiz>> {
        round_repo::due_quizzes(&self.pool, threshold).await
    }

    async fn claim_round(&self, round_id: i64) -> anyhow::Result<bool> {
        round_repo::claim_round(&self.pool, round_id).await
    }

    async fn release_round(&self, round_id: i64) -> anyhow::Result<()> {
        round_repo::release_round(&self.pool, round_id).await
    }

    async fn mark_round_settled(&self, round_id: i64) -> anyhow::Result<()> {
        round_repo::mark_round_settled(&self.pool, round_id).await
    }

    async fn settle_quiz(&self, quiz_id: i64) -> anyhow::Result<()> {
        quiz_repo::settle_quiz(&self.pool, quiz_id).await
    }
}
