//! Error types for answer autosave.
//!
//! Save failures never escape the saver as panics or return values of
//! `notify_edit`. They reach the caller through a [`crate::FailureHandler`]
//! and, when a finalize is awaited, through [`FinalizeError`].

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// A failed request to the save endpoint.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct SaveError {
    /// HTTP status code, if the server answered at all.
    pub status: Option<u16>,
    /// Response body, parsed as JSON when possible.
    pub body: Value,
    /// Short description of what went wrong.
    pub message: String,
}

impl SaveError {
    /// A failure where no response was received.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            body: Value::Null,
            message: message.into(),
        }
    }

    /// A failure with an HTTP status and response body.
    pub fn status(status: u16, body: Value) -> Self {
        Self {
            status: Some(status),
            body,
            message: format!("server responded with status {status}"),
        }
    }

    /// The `message` field of a JSON response body, if present.
    pub fn server_message(&self) -> Option<&str> {
        self.body
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
    }
}

/// Which recovery path a save failure took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Failure of a background flush. The value is kept for retry.
    Transient,
    /// Failure while a finalize was awaited.
    Finalize,
}

impl FailureKind {
    /// Whether the caller is actively waiting on this failure.
    #[inline]
    pub fn is_explicit(self) -> bool {
        matches!(self, Self::Finalize)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transient => f.write_str("background save"),
            Self::Finalize => f.write_str("finalize"),
        }
    }
}

/// A save failure as reported to handlers and finalize callers.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} failed: {error}")]
pub struct SaveFailure {
    /// The endpoint error.
    #[source]
    pub error: SaveError,
    /// Which recovery path was taken.
    pub kind: FailureKind,
}

impl SaveFailure {
    /// Whether the failure happened during an explicit finalize.
    #[inline]
    pub fn explicit(&self) -> bool {
        self.kind.is_explicit()
    }
}

/// Errors returned from [`crate::AutoSaver::finalize`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FinalizeError {
    /// The last edit could not be saved.
    #[error(transparent)]
    Failed(#[from] SaveFailure),

    /// The saver task is no longer running.
    #[error("autosave task has stopped")]
    Stopped,
}

/// Invalid auto-save configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A zero delay would send every keystroke.
    #[error("debounce delay must be greater than zero")]
    ZeroDebounce,

    /// Delay above the accepted maximum.
    #[error("debounce delay of {debounce_ms} ms exceeds the maximum of {max_ms} ms")]
    DebounceTooLong { debounce_ms: u64, max_ms: u64 },
}
