//! HTTP client for the quiz answer API.
//!
//! The quiz server accepts answers for one question at a time as a JSON
//! POST and answers with an empty object on success or `{"message": ...}`
//! with an error status. Requests carry the session cookie and the CSRF
//! token the server expects from its own pages.
//!
//! [`AnswerEndpoint`] plugs the client into a [`quiz_autosave::AutoSaver`].

#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;

pub use client::QuizApiClient;
pub use config::{ClientConfig, DEFAULT_TIMEOUT_SECS};
pub use endpoint::AnswerEndpoint;
pub use error::{ClientError, Result};

/// Current version of the client.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
