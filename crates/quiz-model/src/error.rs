//! Model error types.

use thiserror::Error;

use crate::quiz::QuestionKind;

/// Errors from parsing quiz data or applying edits.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Quiz data JSON could not be parsed.
    #[error("invalid quiz data: {0}")]
    Parse(#[from] serde_json::Error),

    /// Quiz has no questions.
    #[error("quiz {quiz_id} has no questions")]
    NoQuestions { quiz_id: u64 },

    /// Question has no choices to hold an answer.
    #[error("question {question_id} has no choices")]
    NoChoices { question_id: u64 },

    /// Question index outside the quiz.
    #[error("question {index} does not exist (quiz has {len})")]
    QuestionOutOfRange { index: usize, len: usize },

    /// Choice index outside the question.
    #[error("choice {index} does not exist (question {question_id} has {len})")]
    ChoiceOutOfRange {
        question_id: u64,
        index: usize,
        len: usize,
    },

    /// Edit does not apply to this kind of question.
    #[error("cannot {operation} on a {kind} question")]
    WrongKind {
        operation: &'static str,
        kind: QuestionKind,
    },

    /// Unknown question type code.
    #[error("unknown question type {0}")]
    UnknownKind(u8),
}

impl ModelError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Parse(_) | Self::NoQuestions { .. } | Self::UnknownKind(_) => {
                "The quiz data could not be loaded.".to_string()
            }
            Self::NoChoices { .. } => "This question cannot be answered.".to_string(),
            Self::QuestionOutOfRange { len, .. } => {
                format!("Pick a question between 1 and {len}.")
            }
            Self::ChoiceOutOfRange { len, .. } => format!("Pick a choice between 1 and {len}."),
            Self::WrongKind { kind, .. } => match kind {
                QuestionKind::SingleAnswer => "Use `pick` to select one choice.".to_string(),
                QuestionKind::MultipleAnswers | QuestionKind::OpenAnswer => {
                    "Use `toggle` to mark choices.".to_string()
                }
                QuestionKind::TextAnswer => "Use `text` to type an answer.".to_string(),
            },
        }
    }
}

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
