use std::cmp::Ordering;

use crate::models::{CorrectAnswer, MatchOutcome, PendingFutureQuestion, QuestionKind};
use crate::sportsdata::{MatchDetails, MatchStats, StatKind, StatusCategory};

use super::summary::SkipReason;

/// A correct answer ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub question_id: i64,
    pub correct: CorrectAnswer,
}

/// Resolver output for one match: answers to write plus per-question
/// skips for questions that must stay pending.
#[derive(Debug, Default)]
pub struct MatchResolution {
    pub resolved: Vec<Resolution>,
    pub skips: Vec<(i64, SkipReason)>,
}

/// Only final matches resolve. Postponed/cancelled matches never do —
/// no answer is guessed, the questions stay pending.
pub fn is_final(details: &MatchDetails) -> bool {
    details.status_category == StatusCategory::Finished
}

/// Compute correct answers for a finished match's pending questions.
/// `stats` is only needed when a stat-dependent kind is present; a
/// missing stat leaves that question pending, it is not an error.
pub fn resolve_questions(
    details: &MatchDetails,
    stats: Option<&MatchStats>,
    questions: &[PendingFutureQuestion],
) -> MatchResolution {
    let mut out = MatchResolution::default();

    for question in questions {
        match answer_for(question.kind, details, stats) {
            Ok(correct) => out.resolved.push(Resolution {
                question_id: question.question_id,
                correct,
            }),
            Err(reason) => out.skips.push((question.question_id, reason)),
        }
    }

    out
}

fn answer_for(
    kind: QuestionKind,
    details: &MatchDetails,
    stats: Option<&MatchStats>,
) -> Result<CorrectAnswer, SkipReason> {
    match kind {
        QuestionKind::Future1x2 => {
            let (home, away) = final_score(details)?;
            let outcome = match home.cmp(&away) {
                Ordering::Greater => MatchOutcome::Home,
                Ordering::Less => MatchOutcome::Away,
                Ordering::Equal => MatchOutcome::Draw,
            };
            Ok(CorrectAnswer::Outcome(outcome))
        }
        QuestionKind::FutureScore => {
            let (home, away) = final_score(details)?;
            Ok(CorrectAnswer::Score { home, away })
        }
        QuestionKind::FutureYellowCards => stat_total(stats, StatKind::YellowCards),
        QuestionKind::FutureCorners => stat_total(stats, StatKind::Corners),
    }
}

fn final_score(details: &MatchDetails) -> Result<(i64, i64), SkipReason> {
    match (details.score.home, details.score.away) {
        (Some(home), Some(away)) => Ok((home, away)),
        _ => Err(SkipReason::ScoreUnavailable),
    }
}

fn stat_total(stats: Option<&MatchStats>, stat: StatKind) -> Result<CorrectAnswer, SkipReason> {
    stats
        .and_then(|s| s.lookup(stat))
        .map(|pair| CorrectAnswer::Total(pair.total()))
        .ok_or(SkipReason::StatUnavailable {
            stat: stat.canonical().to_string(),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
