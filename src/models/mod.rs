pub mod question;
pub mod round;

pub use question::{CorrectAnswer, MatchOutcome, PendingFutureQuestion, QuestionKind};
pub use round::{DueQuiz, RoundStatus};
