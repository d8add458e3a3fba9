//! Data model for a running quiz session.
//!
//! The server embeds three JSON documents in the quiz page: the quiz data
//! (questions and current answers), the page URLs and the language tags.
//! This crate parses them, applies answer edits, builds the payload for the
//! save-answer endpoint and classifies save errors for display.
//!
//! # Architecture
//!
//! - `quiz.rs` - Quiz, question and choice types, editing and navigation
//! - `answer.rs` - Save-answer request payload
//! - `page.rs` - Page document, URLs and language tags
//! - `countdown.rs` - Remaining time
//! - `notice.rs` - Save error classification
//! - `error.rs` - Error types

mod answer;
mod countdown;
mod error;
mod notice;
mod page;
mod quiz;

pub use answer::{AnswerRequest, ChoiceAnswer};
pub use countdown::{Countdown, format_clock};
pub use error::{ModelError, Result};
pub use notice::{ErrorNotice, NoticeAction};
pub use page::{LanguageTags, QuizPage, QuizUrls};
pub use quiz::{Choice, Question, QuestionKind, QuizData, step_index};
