use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use metrics::counter;

use crate::models::DueQuiz;
use crate::sportsdata::SportsDataGateway;

use super::batch::run_settlement_batch;
use super::store::SettlementStore;
use super::summary::{AutoSettleSummary, QuizSkip, QuizSkipReason};

/// Close out quizzes whose round deadline passed more than
/// `buffer_minutes` ago.
///
/// The future-question batch runs first so a match that finished since
/// the last run does not leave its quiz looking unsettleable. A round is
/// claimed (moved to `settling`) only once at least one of its quizzes
/// has cleared the pending check, right before the settle procedure is
/// invoked; a raced claim skips the round for this run.
pub async fn run_auto_settle(
    store: &dyn SettlementStore,
    gateway: &dyn SportsDataGateway,
    buffer_minutes: u64,
) -> anyhow::Result<AutoSettleSummary> {
    let futures = run_settlement_batch(store, gateway).await?;

    let threshold = Utc::now() - Duration::minutes(buffer_minutes as i64);
    let due = store.due_quizzes(threshold).await?;

    let mut summary = AutoSettleSummary {
        buffer_minutes,
        attempted: due.len(),
        settled: Vec::new(),
        skipped: Vec::new(),
        futures,
    };

    if due.is_empty() {
        tracing::debug!("No rounds past deadline");
        return Ok(summary);
    }

    let mut by_round: BTreeMap<i64, Vec<DueQuiz>> = BTreeMap::new();
    for quiz in due {
        by_round.entry(quiz.round_id).or_default().push(quiz);
    }

    tracing::info!(
        rounds = by_round.len(),
        quizzes = summary.attempted,
        buffer_minutes,
        "Auto-settle: rounds past deadline"
    );

    for (round_id, quizzes) in by_round {
        settle_round(store, round_id, &quizzes, &mut summary).await;
    }

    counter!("quizzes_settled_total").increment(summary.settled.len() as u64);

    tracing::info!(
        attempted = summary.attempted,
        settled = summary.settled.len(),
        skipped = summary.skipped.len(),
        "Auto-settle finished"
    );

    Ok(summary)
}

/// Settle one round's quizzes. All failures stay scoped to this round;
/// the rest of the run continues regardless.
async fn settle_round(
    store: &dyn SettlementStore,
    round_id: i64,
    quizzes: &[DueQuiz],
    summary: &mut AutoSettleSummary,
) {
    // Pending check comes before the claim: a quiz still waiting on
    // future questions must leave its round's status exactly as it was.
    let mut settleable: Vec<&DueQuiz> = Vec::new();
    for quiz in quizzes {
        match store.count_pending_for_quiz(quiz.quiz_id).await {
            Ok(0) => settleable.push(quiz),
            Ok(pending) => {
                tracing::debug!(
                    quiz_id = quiz.quiz_id,
                    round_id,
                    pending,
                    "Quiz still has pending future questions"
                );
                summary.skipped.push(QuizSkip {
                    quiz_id: quiz.quiz_id,
                    round_id,
                    reason: QuizSkipReason::PendingFutureQuestions { pending },
                });
            }
            Err(e) => {
                summary.skipped.push(QuizSkip {
                    quiz_id: quiz.quiz_id,
                    round_id,
                    reason: QuizSkipReason::Storage {
                        message: e.to_string(),
                    },
                });
            }
        }
    }

    if settleable.is_empty() {
        tracing::debug!(round_id, "No settleable quizzes yet — round left untouched");
        return;
    }

    match store.claim_round(round_id).await {
        Ok(true) => {}
        Ok(false) => {
            tracing::debug!(round_id, "Round already claimed or settled — skipping");
            skip_all(summary, round_id, &settleable, QuizSkipReason::RoundClaimed);
            return;
        }
        Err(e) => {
            tracing::error!(round_id, error = %e, "Round claim failed");
            skip_all(
                summary,
                round_id,
                &settleable,
                QuizSkipReason::Storage {
                    message: e.to_string(),
                },
            );
            return;
        }
    }

    let mut all_settled = settleable.len() == quizzes.len();

    for quiz in &settleable {
        match store.settle_quiz(quiz.quiz_id).await {
            Ok(()) => {
                tracing::info!(quiz_id = quiz.quiz_id, round_id, "Quiz settled");
                summary.settled.push(quiz.quiz_id);
            }
            Err(e) => {
                tracing::error!(quiz_id = quiz.quiz_id, round_id, error = %e, "Settle procedure failed");
                all_settled = false;
                summary.skipped.push(QuizSkip {
                    quiz_id: quiz.quiz_id,
                    round_id,
                    reason: QuizSkipReason::SettleFailed {
                        message: e.to_string(),
                    },
                });
            }
        }
    }

    let close = if all_settled {
        store.mark_round_settled(round_id).await
    } else {
        // Drop the claim so the next run retries whatever was skipped.
        store.release_round(round_id).await
    };
    if let Err(e) = close {
        tracing::error!(round_id, error = %e, "Failed to update round status");
    } else if all_settled {
        tracing::info!(round_id, "Round settled");
    }
}

fn skip_all(
    summary: &mut AutoSettleSummary,
    round_id: i64,
    quizzes: &[&DueQuiz],
    reason: QuizSkipReason,
) {
    for quiz in quizzes {
        summary.skipped.push(QuizSkip {
            quiz_id: quiz.quiz_id,
            round_id,
            reason: reason.clone(),
        });
    }
}
