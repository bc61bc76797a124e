use serde::Serialize;

// ---------------------------------------------------------------------------
// Batch runner summary
// ---------------------------------------------------------------------------

/// Why a match or question was left pending this run. A variant per
/// failure category so callers branch on structure, not on message text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// The match row has no provider id to poll.
    MissingExternalId,
    /// Provider has no record for the external id.
    NoProviderRecord,
    /// Match not final yet (includes postponed/cancelled).
    NotFinished { status: String },
    /// Provider unreachable / bad payload / timeout.
    Gateway { message: String },
    /// Match final but a score side is missing.
    ScoreUnavailable,
    /// Match final but no recognized alias for the needed stat.
    StatUnavailable { stat: String },
    /// Write guard hit: `correct` was already non-null.
    AlreadyResolved,
    /// Storage write failed for this question.
    Persistence { message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchSkip {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_id: Option<i64>,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Result of one settlement batch run. Counts are per question;
/// `skips` holds one entry per skipped question or per skipped match
/// (when the whole match was ineligible).
#[derive(Debug, Default, Serialize)]
pub struct BatchSummary {
    pub evaluated: usize,
    pub resolved: usize,
    pub skipped: usize,
    pub skips: Vec<BatchSkip>,
}

impl BatchSummary {
    pub fn skip_match(&mut self, match_id: i64, questions: usize, reason: SkipReason) {
        self.skipped += questions;
        self.skips.push(BatchSkip {
            match_id: Some(match_id),
            question_id: None,
            reason,
        });
    }

    pub fn skip_question(&mut self, match_id: i64, question_id: i64, reason: SkipReason) {
        self.skipped += 1;
        self.skips.push(BatchSkip {
            match_id: Some(match_id),
            question_id: Some(question_id),
            reason,
        });
    }
}

// ---------------------------------------------------------------------------
// Auto-settle summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum QuizSkipReason {
    /// The quiz still has unresolved future questions.
    PendingFutureQuestions { pending: i64 },
    /// Another invocation holds the round's settling claim.
    RoundClaimed,
    /// A storage read/write around the settle call failed; retried next run.
    Storage { message: String },
    /// The settle-quiz procedure failed; retried next run.
    SettleFailed { message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizSkip {
    pub quiz_id: i64,
    pub round_id: i64,
    #[serde(flatten)]
    pub reason: QuizSkipReason,
}

/// Result of one auto-settle run: the future-question batch that ran
/// first, then the per-quiz settlement outcomes.
#[derive(Debug, Serialize)]
pub struct AutoSettleSummary {
    pub buffer_minutes: u64,
    pub attempted: usize,
    pub settled: Vec<i64>,
    pub skipped: Vec<QuizSkip>,
    pub futures: BatchSummary,
}
