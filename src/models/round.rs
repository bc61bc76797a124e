use std::fmt;

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Round lifecycle. `Settling` is the short-lived claim state a scheduler
/// invocation moves a round into before invoking the settle procedure, so
/// two concurrent invocations cannot settle the same round twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    Draft,
    Published,
    Locked,
    Settling,
    Settled,
}

impl RoundStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundStatus::Draft => "draft",
            RoundStatus::Published => "published",
            RoundStatus::Locked => "locked",
            RoundStatus::Settling => "settling",
            RoundStatus::Settled => "settled",
        }
    }

}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A quiz whose round deadline has passed and whose round is not yet
/// settled (or mid-claim).
#[derive(Debug, Clone, FromRow)]
pub struct DueQuiz {
    pub quiz_id: i64,
    pub round_id: i64,
    pub deadline_at: DateTime<Utc>,
}
