//! Debounced autosave for quiz answers.
//!
//! An [`AutoSaver`] sits between an editing UI and a remote save endpoint.
//! Rapid edits are coalesced into a single request, at most one request is
//! in flight at a time, and [`AutoSaver::finalize`] lets the caller wait until
//! the latest edit has reached the server before moving on.
//!
//! # Features
//!
//! - **Debounce**: an edit arms a single-shot timer; later edits reset it
//! - **One request in flight**: edits arriving during a send are queued and
//!   sent right after it completes
//! - **No data loss**: a failed value is kept and retried on the next flush
//! - **Two failure paths**: background failures are reported with
//!   `explicit = false`, failures while a finalize is awaited with
//!   `explicit = true`
//!
//! # Example
//!
//! ```ignore
//! use quiz_autosave::{AutoSaveConfig, AutoSaver, SaveFailure};
//!
//! let saver = AutoSaver::spawn(AutoSaveConfig::default(), endpoint, |failure: &SaveFailure| {
//!     eprintln!("save failed: {failure}");
//! });
//!
//! saver.notify_edit(answer.clone());
//! saver.finalize().await?;
//! ```
//!
//! # Architecture
//!
//! - `state` - The pure state machine (pending, in-flight, finalize waiters)
//! - `saver` - The tokio driver that owns the state machine
//! - `endpoint` - Traits for the save endpoint and the failure handler
//! - `config.rs` - Debounce settings
//! - `error.rs` - Error types

mod config;
mod endpoint;
mod error;
mod saver;
mod state;

pub use config::{AutoSaveConfig, DEFAULT_DEBOUNCE_MS, MAX_DEBOUNCE_MS};
pub use endpoint::{FailureHandler, SaveEndpoint};
pub use error::{ConfigError, FailureKind, FinalizeError, SaveError, SaveFailure};
pub use saver::AutoSaver;
pub use state::{FailureOutcome, FinalizeOutcome, Phase, SaveState, SuccessOutcome};
