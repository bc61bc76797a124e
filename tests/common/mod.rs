use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use quizsettle::models::{CorrectAnswer, DueQuiz, PendingFutureQuestion, QuestionKind, RoundStatus};
use quizsettle::settlement::SettlementStore;
use quizsettle::sportsdata::{
    GatewayError, MatchDetails, MatchStats, ScorePair, SportsDataGateway, StatusCategory,
};

// ---------------------------------------------------------------------------
// Scripted gateway
// ---------------------------------------------------------------------------

/// Gateway fake with pre-scripted provider state per external match id.
#[derive(Default)]
#[allow(dead_code)]
pub struct FakeGateway {
    details: HashMap<String, MatchDetails>,
    stats: HashMap<String, MatchStats>,
    fail_details: HashSet<String>,
    fail_stats: HashSet<String>,
}

#[allow(dead_code)]
impl FakeGateway {
    pub fn with_details(mut self, external_id: &str, details: MatchDetails) -> Self {
        self.details.insert(external_id.to_string(), details);
        self
    }

    pub fn with_stats(mut self, external_id: &str, stats: MatchStats) -> Self {
        self.stats.insert(external_id.to_string(), stats);
        self
    }

    pub fn failing_details(mut self, external_id: &str) -> Self {
        self.fail_details.insert(external_id.to_string());
        self
    }

    pub fn failing_stats(mut self, external_id: &str) -> Self {
        self.fail_stats.insert(external_id.to_string());
        self
    }
}

#[async_trait]
impl SportsDataGateway for FakeGateway {
    async fn match_details(
        &self,
        external_id: &str,
    ) -> Result<Option<MatchDetails>, GatewayError> {
        if self.fail_details.contains(external_id) {
            return Err(GatewayError::Unexpected("provider unreachable".into()));
        }
        Ok(self.details.get(external_id).cloned())
    }

    async fn match_stats(&self, external_id: &str) -> Result<Option<MatchStats>, GatewayError> {
        if self.fail_stats.contains(external_id) {
            return Err(GatewayError::Unexpected("provider unreachable".into()));
        }
        Ok(self.stats.get(external_id).cloned())
    }
}

#[allow(dead_code)]
pub fn match_with_status(external_id: &str, status_id: i64, status_name: &str) -> MatchDetails {
    MatchDetails {
        id: external_id.to_string(),
        status_id,
        status_category: StatusCategory::from_provider_id(status_id),
        status_name: status_name.to_string(),
        score: ScorePair {
            home: None,
            away: None,
        },
    }
}

#[allow(dead_code)]
pub fn finished_match(external_id: &str, home: i64, away: i64) -> MatchDetails {
    MatchDetails {
        id: external_id.to_string(),
        status_id: 8,
        status_category: StatusCategory::Finished,
        status_name: "Ended".to_string(),
        score: ScorePair {
            home: Some(home),
            away: Some(away),
        },
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

#[allow(dead_code)]
pub struct StoredQuestion {
    pub id: i64,
    pub quiz_id: i64,
    pub kind: QuestionKind,
    pub match_id: i64,
    pub external_match_id: Option<String>,
    pub correct: Option<Value>,
}

#[allow(dead_code)]
pub struct RoundState {
    pub deadline_at: DateTime<Utc>,
    pub status: RoundStatus,
}

#[derive(Default)]
#[allow(dead_code)]
pub struct MemoryInner {
    pub questions: Vec<StoredQuestion>,
    pub rounds: BTreeMap<i64, RoundState>,
    pub quizzes: Vec<(i64, i64)>, // (quiz_id, round_id)
    pub failing_settles: HashSet<i64>,
    pub settle_calls: Vec<i64>,
    pub last_threshold: Option<DateTime<Utc>>,
}

/// In-memory stand-in for the relational store, mirroring the SQL
/// filters the Postgres store applies.
#[derive(Default)]
pub struct MemoryStore {
    pub inner: Mutex<MemoryInner>,
}

#[allow(dead_code)]
impl MemoryStore {
    pub fn add_question(
        &self,
        id: i64,
        quiz_id: i64,
        kind: QuestionKind,
        match_id: i64,
        external_match_id: Option<&str>,
    ) {
        self.inner.lock().unwrap().questions.push(StoredQuestion {
            id,
            quiz_id,
            kind,
            match_id,
            external_match_id: external_match_id.map(str::to_string),
            correct: None,
        });
    }

    pub fn add_round(&self, round_id: i64, deadline_at: DateTime<Utc>, status: RoundStatus) {
        self.inner.lock().unwrap().rounds.insert(
            round_id,
            RoundState {
                deadline_at,
                status,
            },
        );
    }

    pub fn add_quiz(&self, quiz_id: i64, round_id: i64) {
        self.inner.lock().unwrap().quizzes.push((quiz_id, round_id));
    }

    pub fn fail_settle(&self, quiz_id: i64) {
        self.inner.lock().unwrap().failing_settles.insert(quiz_id);
    }

    pub fn clear_settle_failure(&self, quiz_id: i64) {
        self.inner.lock().unwrap().failing_settles.remove(&quiz_id);
    }

    pub fn correct_answer(&self, question_id: i64) -> Option<Value> {
        self.inner
            .lock()
            .unwrap()
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .and_then(|q| q.correct.clone())
    }

    pub fn decoded_answer(&self, question_id: i64) -> Option<CorrectAnswer> {
        let inner = self.inner.lock().unwrap();
        let question = inner.questions.iter().find(|q| q.id == question_id)?;
        let value = question.correct.as_ref()?;
        Some(CorrectAnswer::from_json(question.kind, value).expect("stored answer decodes"))
    }

    pub fn round_status(&self, round_id: i64) -> RoundStatus {
        self.inner.lock().unwrap().rounds[&round_id].status
    }

    pub fn settle_calls(&self) -> Vec<i64> {
        self.inner.lock().unwrap().settle_calls.clone()
    }

    pub fn last_threshold(&self) -> Option<DateTime<Utc>> {
        self.inner.lock().unwrap().last_threshold
    }
}

#[async_trait]
impl SettlementStore for MemoryStore {
    async fn pending_future_questions(&self) -> anyhow::Result<Vec<PendingFutureQuestion>> {
        let inner = self.inner.lock().unwrap();
        let mut pending: Vec<PendingFutureQuestion> = inner
            .questions
            .iter()
            .filter(|q| q.correct.is_none())
            .map(|q| PendingFutureQuestion {
                question_id: q.id,
                quiz_id: q.quiz_id,
                kind: q.kind,
                match_id: q.match_id,
                external_match_id: q.external_match_id.clone(),
                home_team: "Home FC".into(),
                away_team: "Away FC".into(),
                kickoff_at: Utc::now(),
                match_status: "scheduled".into(),
            })
            .collect();
        pending.sort_by_key(|q| (q.match_id, q.question_id));
        Ok(pending)
    }

    async fn record_correct_answer(
        &self,
        question_id: i64,
        correct: &CorrectAnswer,
    ) -> anyhow::Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        let question = inner
            .questions
            .iter_mut()
            .find(|q| q.id == question_id)
            .ok_or_else(|| anyhow::anyhow!("no question {question_id}"))?;
        if question.correct.is_some() {
            return Ok(false);
        }
        question.correct = Some(correct.to_json());
        Ok(true)
    }

    async fn count_pending_for_quiz(&self, quiz_id: i64) -> anyhow::Result<i64> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .questions
            .iter()
            .filter(|q| q.quiz_id == quiz_id && q.correct.is_none())
            .count() as i64)
    }

    async fn due_quizzes(&self, threshold: DateTime<Utc>) -> anyhow::Result<Vec<DueQuiz>> {
        let mut inner = self.inner.lock().unwrap();
        inner.last_threshold = Some(threshold);
        let due = inner
            .quizzes
            .iter()
            .filter_map(|(quiz_id, round_id)| {
                let round = inner.rounds.get(round_id)?;
                let eligible = round.deadline_at <= threshold
                    && !matches!(round.status, RoundStatus::Settled | RoundStatus::Settling);
                eligible.then(|| DueQuiz {
                    quiz_id: *quiz_id,
                    round_id: *round_id,
                    deadline_at: round.deadline_at,
                })
            })
            .collect();
        Ok(due)
    }

    async fn claim_round(&self, round_id: i64) -> anyhow::Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        let round = inner
            .rounds
            .get_mut(&round_id)
            .ok_or_else(|| anyhow::anyhow!("no round {round_id}"))?;
        if matches!(round.status, RoundStatus::Settled | RoundStatus::Settling) {
            return Ok(false);
        }
        round.status = RoundStatus::Settling;
        Ok(true)
    }

    async fn release_round(&self, round_id: i64) -> anyhow::Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(round) = inner.rounds.get_mut(&round_id) {
            if round.status == RoundStatus::Settling {
                round.status = RoundStatus::Locked;
            }
        }
        Ok(())
    }

    async fn mark_round_settled(&self, round_id: i64) -> anyhow::Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(round) = inner.rounds.get_mut(&round_id) {
            round.status = RoundStatus::Settled;
        }
        Ok(())
    }

    async fn settle_quiz(&self, quiz_id: i64) -> anyhow::Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.failing_settles.contains(&quiz_id) {
            anyhow::bail!("settle procedure rejected quiz {quiz_id}");
        }
        inner.settle_calls.push(quiz_id);
        Ok(())
    }
}
