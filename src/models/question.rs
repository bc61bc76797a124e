use std::fmt;

use anyhow::bail;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// QuestionKind
// ---------------------------------------------------------------------------

/// Question kinds whose correct answer depends on the result of a
/// real-world match ("future" questions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionKind {
    /// Match outcome: home win / draw / away win.
    Future1x2,
    /// Exact final score.
    FutureScore,
    /// Total yellow cards, both teams.
    FutureYellowCards,
    /// Total corner kicks, both teams.
    FutureCorners,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 4] = [
        QuestionKind::Future1x2,
        QuestionKind::FutureScore,
        QuestionKind::FutureYellowCards,
        QuestionKind::FutureCorners,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::Future1x2 => "future_1x2",
            QuestionKind::FutureScore => "future_score",
            QuestionKind::FutureYellowCards => "future_yellow_cards",
            QuestionKind::FutureCorners => "future_corners",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "future_1x2" => Some(QuestionKind::Future1x2),
            "future_score" => Some(QuestionKind::FutureScore),
            "future_yellow_cards" => Some(QuestionKind::FutureYellowCards),
            "future_corners" => Some(QuestionKind::FutureCorners),
            _ => None,
        }
    }

    /// True for kinds that need the provider's match statistics
    /// in addition to the final score.
    pub fn needs_stats(&self) -> bool {
        matches!(
            self,
            QuestionKind::FutureYellowCards | QuestionKind::FutureCorners
        )
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MatchOutcome / CorrectAnswer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Home,
    Draw,
    Away,
}

impl MatchOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchOutcome::Home => "home",
            MatchOutcome::Draw => "draw",
            MatchOutcome::Away => "away",
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settled value for a future question. The JSON shape stored in
/// `quiz_questions.correct` differs per question kind, so encoding and
/// decoding are explicit and keyed by kind rather than left to blanket
/// serde derives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrectAnswer {
    /// `"home" | "draw" | "away"` (future_1x2).
    Outcome(MatchOutcome),
    /// `{"home": n, "away": n}` (future_score).
    Score { home: i64, away: i64 },
    /// Bare integer (future_yellow_cards, future_corners).
    Total(i64),
}

impl CorrectAnswer {
    pub fn to_json(&self) -> Value {
        match self {
            CorrectAnswer::Outcome(o) => json!(o.as_str()),
            CorrectAnswer::Score { home, away } => json!({ "home": home, "away": away }),
            CorrectAnswer::Total(n) => json!(n),
        }
    }

    /// Decode a stored `correct` value, validating the shape against the
    /// question kind it belongs to.
    pub fn from_json(kind: QuestionKind, value: &Value) -> anyhow::Result<Self> {
        match kind {
            QuestionKind::Future1x2 => match value.as_str() {
                Some("home") => Ok(CorrectAnswer::Outcome(MatchOutcome::Home)),
                Some("draw") => Ok(CorrectAnswer::Outcome(MatchOutcome::Draw)),
                Some("away") => Ok(CorrectAnswer::Outcome(MatchOutcome::Away)),
                _ => bail!("invalid 1x2 answer: {value}"),
            },
            QuestionKind::FutureScore => {
                let home = value.get("home").and_then(Value::as_i64);
                let away = value.get("away").and_then(Value::as_i64);
                match (home, away) {
                    (Some(home), Some(away)) => Ok(CorrectAnswer::Score { home, away }),
                    _ => bail!("invalid score answer: {value}"),
                }
            }
            QuestionKind::FutureYellowCards | QuestionKind::FutureCorners => value
                .as_i64()
                .map(CorrectAnswer::Total)
                .ok_or_else(|| anyhow::anyhow!("invalid total answer: {value}")),
        }
    }
}

// ---------------------------------------------------------------------------
// PendingFutureQuestion
// ---------------------------------------------------------------------------

/// A future question with `correct IS NULL`, joined to its match row.
/// This is the unit the settlement batch operates on.
#[derive(Debug, Clone)]
pub struct PendingFutureQuestion {
    pub question_id: i64,
    pub quiz_id: i64,
    pub kind: QuestionKind,
    pub match_id: i64,
    pub external_match_id: Option<String>,
    pub home_team: String,
    pub away_team: String,
    pub kickoff_at: DateTime<Utc>,
    pub match_status: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
