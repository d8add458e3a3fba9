//! Line commands typed at the quiz prompt.

use quiz_model::LanguageTags;
use thiserror::Error;

/// Help shown by the `help` command.
pub const HELP: &str = "\
Commands:
  show           Show the current question
  list           List all questions
  go N           Go to question N
  next, n        Go to the next question
  prev, p        Go to the previous question
  pick N         Choose answer N (single answer)
  toggle N       Mark or unmark answer N (multiple or open answers)
  text ANSWER    Type an answer (text questions)
  submit         Save and finish the quiz
  quit, q        Save and leave without finishing
  help, ?        Show this help";

/// A parsed prompt command. Indices are zero-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    List,
    Go(usize),
    Next,
    Prev,
    Pick(usize),
    Toggle(usize),
    Text(String),
    Submit,
    Quit,
    Help,
}

/// Errors from [`parse_line`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("'{command}' needs a number")]
    MissingNumber { command: &'static str },

    #[error("'{value}' is not a number from 1 up")]
    BadNumber { value: String },
}

/// Parse one input line. Blank lines yield `None`.
///
/// Numbers are one-based as shown to the user.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() {
        return Ok(None);
    }

    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "show" => Command::Show,
        "list" | "ls" => Command::List,
        "go" => Command::Go(number("go", rest)?),
        "next" | "n" => Command::Next,
        "prev" | "p" => Command::Prev,
        "pick" => Command::Pick(number("pick", rest)?),
        "toggle" => Command::Toggle(number("toggle", rest)?),
        // Text is kept as typed, apart from the separating space.
        "text" => Command::Text(rest.to_string()),
        "submit" | "finish" => Command::Submit,
        "quit" | "q" | "exit" => Command::Quit,
        "help" | "?" => Command::Help,
        _ => return Err(ParseError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}

/// Parse a line, also accepting the page's own words for
/// next, previous and finish.
pub fn parse_tagged(line: &str, tags: &LanguageTags) -> Result<Option<Command>, ParseError> {
    let word = line.trim();
    let command = if matches_tag(word, &tags.next) {
        Command::Next
    } else if matches_tag(word, &tags.previous) {
        Command::Prev
    } else if matches_tag(word, &tags.finish) {
        Command::Submit
    } else {
        return parse_line(line);
    };
    Ok(Some(command))
}

/// Whether an answer to a confirmation question means yes.
pub fn is_confirmed(answer: &str, tags: &LanguageTags) -> bool {
    let answer = answer.trim();
    matches_tag(answer, &tags.ok)
        || ["y", "yes", "ok"]
            .iter()
            .any(|yes| answer.eq_ignore_ascii_case(yes))
}

fn matches_tag(word: &str, tag: &str) -> bool {
    !word.is_empty() && word.to_lowercase() == tag.trim().to_lowercase()
}

fn number(command: &'static str, arg: &str) -> Result<usize, ParseError> {
    let arg = arg.trim();
    if arg.is_empty() {
        return Err(ParseError::MissingNumber { command });
    }
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(ParseError::BadNumber {
            value: arg.to_string(),
        }),
    }
}
