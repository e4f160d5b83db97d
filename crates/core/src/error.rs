use thiserror::Error;

use crate::model::{QuestionError, QuizError, ScoreRecordError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Score(#[from] ScoreRecordError),
}
