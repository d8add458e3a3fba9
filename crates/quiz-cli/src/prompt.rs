//! Interactive prompt driving a [`QuizSession`].

use std::io::{self, Write};

use quiz_model::{ErrorNotice, NoticeAction, format_clock};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::command::{Command, HELP, is_confirmed, parse_tagged};
use crate::error::SessionError;
use crate::render::{render_list, render_notice, render_question};
use crate::session::{QuizServer, QuizSession};

/// How a prompt session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOutcome {
    /// The quiz was submitted.
    Submitted,
    /// The user left; answers were saved but the quiz is still open.
    Left,
    /// The user left, but the last answer could not be saved.
    LeftUnsaved,
    /// The server reported the quiz as over.
    QuizOver,
}

/// Read commands from `input` until the quiz is submitted, left or over.
///
/// End of input counts as `quit`.
pub async fn run_prompt<S, R, W>(
    mut session: QuizSession<S>,
    input: R,
    out: &mut W,
) -> io::Result<PromptOutcome>
where
    S: QuizServer,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut time_warned = false;
    show(&session, out)?;

    loop {
        for notice in session.take_notices() {
            if notify(&session, &notice, out)? {
                return Ok(PromptOutcome::QuizOver);
            }
        }
        if !time_warned && session.countdown().is_over() {
            writeln!(out, "{}", session.tags().no_time_left)?;
            time_warned = true;
        }

        write!(
            out,
            "[{} | {}] > ",
            format_clock(session.countdown().time_left()),
            session.phase().label()
        )?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            return leave(session, out).await;
        };
        let command = match parse_tagged(&line, session.tags()) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };

        let result = match command {
            Command::Show => Ok(()),
            Command::List => {
                writeln!(out, "{}", render_list(session.quiz(), session.chosen_index()))?;
                continue;
            }
            Command::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Command::Go(index) => session.choose(index).await,
            Command::Next => session.step(1).await,
            Command::Prev => session.step(-1).await,
            Command::Pick(index) => session.pick(index).map(drop),
            Command::Toggle(index) => session.toggle(index).map(drop),
            Command::Text(text) => session.set_text(&text).map(drop),
            Command::Submit => {
                if let Err(err) = session.save().await {
                    Err(err)
                } else if confirm_finish(&session, &mut lines, out).await? {
                    match session.submit().await {
                        Ok(()) => {
                            writeln!(out, "Answers submitted.")?;
                            return Ok(PromptOutcome::Submitted);
                        }
                        Err(err) => Err(err),
                    }
                } else {
                    writeln!(out, "{}", session.tags().cancel)?;
                    continue;
                }
            }
            Command::Quit => return leave(session, out).await,
        };

        match result {
            Ok(()) => show(&session, out)?,
            Err(err) => {
                if report(&session, &err, out)? {
                    return Ok(PromptOutcome::QuizOver);
                }
            }
        }
    }
}

fn show<S: QuizServer, W: Write>(session: &QuizSession<S>, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "{}",
        render_question(
            session.chosen(),
            session.chosen_index(),
            session.quiz().questions.len(),
            session.tags()
        )
    )
}

/// Ask before finishing. End of input counts as no.
async fn confirm_finish<S, R, W>(
    session: &QuizSession<S>,
    lines: &mut Lines<R>,
    out: &mut W,
) -> io::Result<bool>
where
    S: QuizServer,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let tags = session.tags();
    write!(out, "{}? [{}/{}] ", tags.finish, tags.ok, tags.no)?;
    out.flush()?;
    let answer = lines.next_line().await?.unwrap_or_default();
    Ok(is_confirmed(&answer, tags))
}

/// Print a notice and where to go next. Returns whether the quiz is over.
fn notify<S: QuizServer, W: Write>(
    session: &QuizSession<S>,
    notice: &ErrorNotice,
    out: &mut W,
) -> io::Result<bool> {
    writeln!(out, "{}", render_notice(notice))?;
    if notice.action() == NoticeAction::GoHome {
        writeln!(out, "Back to the quiz list: {}", session.home_url())?;
    }
    Ok(notice.end_of_quiz)
}

/// Print an error. Returns whether the quiz is over.
fn report<S: QuizServer, W: Write>(
    session: &QuizSession<S>,
    err: &SessionError,
    out: &mut W,
) -> io::Result<bool> {
    let over = match err.notice(session.tags()) {
        Some(notice) => notify(session, &notice, out)?,
        None => {
            writeln!(out, "{}", err.user_message())?;
            false
        }
    };
    if !over && err.is_retryable() {
        writeln!(out, "You can try again.")?;
    }
    Ok(over)
}

async fn leave<S: QuizServer, W: Write>(
    session: QuizSession<S>,
    out: &mut W,
) -> io::Result<PromptOutcome> {
    if session.phase().has_unsaved() {
        writeln!(out, "Saving your answer...")?;
    }
    let tags = session.tags().clone();
    let home = session.home_url();
    match session.close().await {
        Ok(()) => Ok(PromptOutcome::Left),
        Err(err) => {
            tracing::warn!("Leaving with an unsaved answer: {err}");
            match err.notice(&tags) {
                Some(notice) => {
                    writeln!(out, "{}", render_notice(&notice))?;
                    if notice.action() == NoticeAction::GoHome {
                        writeln!(out, "Back to the quiz list: {home}")?;
                    }
                }
                None => writeln!(out, "{}", err.user_message())?,
            }
            Ok(PromptOutcome::LeftUnsaved)
        }
    }
}
