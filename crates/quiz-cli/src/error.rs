//! Session errors.

use quiz_autosave::FinalizeError;
use quiz_client::ClientError;
use quiz_model::{ErrorNotice, LanguageTags, ModelError};
use thiserror::Error;

/// Errors from quiz session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The edit or navigation target is invalid.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The current answer could not be saved.
    #[error("answer was not saved: {0}")]
    Save(#[from] FinalizeError),

    /// The finish request failed.
    #[error("could not finish the quiz: {0}")]
    Finish(#[from] ClientError),

    /// The quiz was already submitted.
    #[error("the quiz is already finished")]
    Finished,
}

impl SessionError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Model(err) => err.user_message(),
            Self::Save(_) => "Your answer was not saved.".to_string(),
            Self::Finish(err) => err.user_message().to_string(),
            Self::Finished => "The quiz is already finished.".to_string(),
        }
    }

    /// Whether repeating the operation might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Save(FinalizeError::Failed(failure)) => {
                !matches!(failure.error.status, Some(404 | 410))
            }
            Self::Finish(err) => err.is_retryable(),
            Self::Save(FinalizeError::Stopped) | Self::Model(_) | Self::Finished => false,
        }
    }

    /// Notice for failures that reached the server, classified the way
    /// save failures are. Model errors have none.
    pub fn notice(&self, tags: &LanguageTags) -> Option<ErrorNotice> {
        match self {
            Self::Save(FinalizeError::Failed(failure)) => Some(ErrorNotice::classify(
                failure.error.status,
                failure.error.server_message(),
                true,
                tags,
            )),
            Self::Save(FinalizeError::Stopped) => {
                Some(ErrorNotice::classify(None, None, true, tags))
            }
            Self::Finish(ClientError::Status { status, body }) => Some(ErrorNotice::classify(
                Some(*status),
                body.get("message").and_then(|m| m.as_str()),
                true,
                tags,
            )),
            Self::Finish(_) => Some(ErrorNotice::classify(None, None, true, tags)),
            Self::Model(_) | Self::Finished => None,
        }
    }
}

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
