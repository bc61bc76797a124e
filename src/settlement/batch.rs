use std::collections::BTreeMap;

use metrics::counter;

use crate::models::PendingFutureQuestion;
use crate::sportsdata::SportsDataGateway;

use super::resolver;
use super::store::SettlementStore;
use super::summary::{BatchSummary, SkipReason};

/// Run one settlement pass over every pending future question.
///
/// One details fetch (plus at most one stats fetch) per distinct match.
/// Per-match and per-question failures are recorded in the summary and
/// never abort the rest of the batch; only the initial candidate-set
/// query is fatal to the invocation.
pub async fn run_settlement_batch(
    store: &dyn SettlementStore,
    gateway: &dyn SportsDataGateway,
) -> anyhow::Result<BatchSummary> {
    counter!("settlement_runs_total").increment(1);

    let pending = store.pending_future_questions().await?;
    let mut summary = BatchSummary::default();

    if pending.is_empty() {
        tracing::debug!("No pending future questions");
        return Ok(summary);
    }

    // Group by internal match id; BTreeMap keeps run order deterministic.
    let mut by_match: BTreeMap<i64, Vec<PendingFutureQuestion>> = BTreeMap::new();
    for question in pending {
        by_match.entry(question.match_id).or_default().push(question);
    }

    tracing::info!(
        matches = by_match.len(),
        "Settlement batch: resolving pending future questions"
    );

    for (match_id, questions) in by_match {
        summary.evaluated += questions.len();
        settle_match(store, gateway, match_id, questions, &mut summary).await;
    }

    counter!("questions_resolved_total").increment(summary.resolved as u64);
    counter!("questions_skipped_total").increment(summary.skipped as u64);

    tracing::info!(
        evaluated = summary.evaluated,
        resolved = summary.resolved,
        skipped = summary.skipped,
        "Settlement batch finished"
    );

    Ok(summary)
}

async fn settle_match(
    store: &dyn SettlementStore,
    gateway: &dyn SportsDataGateway,
    match_id: i64,
    questions: Vec<PendingFutureQuestion>,
    summary: &mut BatchSummary,
) {
    let Some(external_id) = questions[0].external_match_id.clone() else {
        summary.skip_match(match_id, questions.len(), SkipReason::MissingExternalId);
        return;
    };

    let details = match gateway.match_details(&external_id).await {
        Ok(Some(details)) => details,
        Ok(None) => {
            summary.skip_match(match_id, questions.len(), SkipReason::NoProviderRecord);
            return;
        }
        Err(e) => {
            counter!("gateway_errors_total").increment(1);
            tracing::warn!(match_id, error = %e, "Match details fetch failed — skipping match");
            summary.skip_match(
                match_id,
                questions.len(),
                SkipReason::Gateway {
                    message: e.to_string(),
                },
            );
            return;
        }
    };

    if !resolver::is_final(&details) {
        summary.skip_match(
            match_id,
            questions.len(),
            SkipReason::NotFinished {
                status: details.status_name.clone(),
            },
        );
        return;
    }

    // Stats are fetched lazily, only when a stat-dependent kind is pending.
    // A failed stats fetch skips just those questions; score-based kinds
    // still resolve from the details we already have.
    let mut questions = questions;
    let stats = if questions.iter().any(|q| q.kind.needs_stats()) {
        match gateway.match_stats(&external_id).await {
            Ok(stats) => stats,
            Err(e) => {
                counter!("gateway_errors_total").increment(1);
                tracing::warn!(match_id, error = %e, "Match stats fetch failed");
                let message = e.to_string();
                questions.retain(|q| {
                    if q.kind.needs_stats() {
                        summary.skip_question(
                            match_id,
                            q.question_id,
                            SkipReason::Gateway {
                                message: message.clone(),
                            },
                        );
                        false
                    } else {
                        true
                    }
                });
                None
            }
        }
    } else {
        None
    };

    let resolution = resolver::resolve_questions(&details, stats.as_ref(), &questions);

    for (question_id, reason) in resolution.skips {
        summary.skip_question(match_id, question_id, reason);
    }

    for item in resolution.resolved {
        match store.record_correct_answer(item.question_id, &item.correct).await {
            Ok(true) => {
                summary.resolved += 1;
                tracing::info!(
                    match_id,
                    question_id = item.question_id,
                    correct = %item.correct.to_json(),
                    "Future question resolved"
                );
            }
            Ok(false) => {
                summary.skip_question(match_id, item.question_id, SkipReason::AlreadyResolved);
            }
            Err(e) => {
                tracing::error!(
                    match_id,
                    question_id = item.question_id,
                    error = %e,
                    "Failed to persist answer"
                );
                summary.skip_question(
                    match_id,
                    item.question_id,
                    SkipReason::Persistence {
                        message: e.to_string(),
                    },
                );
            }
        }
    }
}
