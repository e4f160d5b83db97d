mod question;
mod score;
mod session;

pub use question::{ALLOTTED_SECONDS, OPTIONS_PER_QUESTION, Question, QuestionError, question_bank};
pub use score::{ScoreRecord, ScoreRecordError};
pub use session::{FinalizedResult, QuizError, QuizPhase, QuizSession, TickOutcome};
