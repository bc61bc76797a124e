pub mod batch;
pub mod resolver;
pub mod scheduler;
pub mod store;
pub mod summary;

pub use batch::run_settlement_batch;
pub use scheduler::run_auto_settle;
pub use store::{PgStore, SettlementStore};
pub use summary::{AutoSettleSummary, BatchSummary, QuizSkip, QuizSkipReason, SkipReason};
