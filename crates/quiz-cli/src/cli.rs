//! CLI argument definitions for the quiz runner.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use quiz_autosave::DEFAULT_DEBOUNCE_MS;
use quiz_client::DEFAULT_TIMEOUT_SECS;

#[derive(Parser)]
#[command(
    name = "quiz",
    version,
    about = "Take a quiz from the terminal",
    long_about = "Take a quiz from the terminal.\n\n\
                  Answers are saved in the background shortly after each change,\n\
                  and always before moving to another question or finishing."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Take a quiz interactively.
    Take(TakeArgs),

    /// Show the questions of a quiz page and which are answered.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct TakeArgs {
    /// Quiz page JSON with `quiz`, `urls` and optional `tags`.
    #[arg(long = "data", value_name = "FILE")]
    pub data: PathBuf,

    /// Quiz server origin, e.g. https://quiz.example.org.
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: String,

    /// CSRF token of the logged-in session.
    #[arg(long = "csrf-token", env = "QUIZ_CSRF_TOKEN", value_name = "TOKEN")]
    pub csrf_token: Option<String>,

    /// Session cookie of the logged-in user.
    #[arg(long = "session-cookie", env = "QUIZ_SESSION_COOKIE", value_name = "VALUE")]
    pub session_cookie: Option<String>,

    /// Delay after the last change before an answer is saved.
    #[arg(long = "debounce-ms", value_name = "MS", default_value_t = DEFAULT_DEBOUNCE_MS)]
    pub debounce_ms: u64,

    /// Only save when moving between questions or finishing.
    #[arg(long = "no-autosave")]
    pub no_autosave: bool,

    /// Request timeout.
    #[arg(long = "timeout-secs", value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Quiz page JSON with `quiz`, `urls` and optional `tags`.
    #[arg(long = "data", value_name = "FILE")]
    pub data: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
