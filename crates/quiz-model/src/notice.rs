//! Classification of save errors for display.

use crate::page::LanguageTags;

/// What the user can do after dismissing a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeAction {
    /// Stay on the quiz.
    Dismiss,
    /// Leave for the quiz list; the quiz is gone or finished.
    GoHome,
}

/// A save error, ready to be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    pub title: String,
    pub message: String,
    pub end_of_quiz: bool,
    /// Whether a blocking dialog should be shown. Background failures
    /// that do not end the quiz are only logged.
    pub show_dialog: bool,
}

impl ErrorNotice {
    /// Classify a failed save.
    ///
    /// `status` is the HTTP status, if any response arrived; `server_message`
    /// is the `message` field of the response body. `explicit` is true when
    /// the user was waiting on the save (navigation or finish).
    pub fn classify(
        status: Option<u16>,
        server_message: Option<&str>,
        explicit: bool,
        tags: &LanguageTags,
    ) -> Self {
        let end_of_quiz = matches!(status, Some(404 | 410));
        let message = server_message
            .filter(|m| !m.is_empty())
            .unwrap_or(tags.network_error.as_str())
            .to_string();
        let title = if end_of_quiz {
            tags.quiz_is_over.clone()
        } else {
            tags.error.clone()
        };

        Self {
            title,
            message,
            end_of_quiz,
            show_dialog: explicit || end_of_quiz,
        }
    }

    /// Action offered after the notice.
    pub fn action(&self) -> NoticeAction {
        if self.end_of_quiz {
            NoticeAction::GoHome
        } else {
            NoticeAction::Dismiss
        }
    }
}
