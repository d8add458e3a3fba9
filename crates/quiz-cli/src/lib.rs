//! Terminal quiz runner.
//!
//! A [`session::QuizSession`] holds the quiz being taken and saves the
//! chosen question's answer in the background through a debounced
//! [`quiz_autosave::AutoSaver`]. The prompt reads line commands and
//! drives the session.

pub mod command;
pub mod error;
pub mod logging;
pub mod prompt;
pub mod render;
pub mod session;

pub use error::{Result, SessionError};
pub use prompt::{PromptOutcome, run_prompt};
pub use session::{QuizServer, QuizSession};
