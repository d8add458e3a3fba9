use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use quiz_autosave::AutoSaveConfig;
use quiz_cli::render::question_table;
use quiz_cli::{PromptOutcome, QuizSession, run_prompt};
use quiz_client::{AnswerEndpoint, ClientConfig, QuizApiClient};
use quiz_model::{QuizPage, format_clock};
use tracing::{Instrument, info_span};

use crate::cli::{InspectArgs, TakeArgs};

pub fn load_page(path: &Path) -> Result<QuizPage> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read quiz page {}", path.display()))?;
    QuizPage::from_json(&json).with_context(|| format!("parse quiz page {}", path.display()))
}

pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    let page = load_page(&args.data)?;
    let quiz = &page.quiz;
    println!("Quiz: {} (id {})", quiz.name, quiz.id);
    println!(
        "Time left: {}",
        format_clock(std::time::Duration::from_secs(
            u64::try_from(quiz.time_left).unwrap_or(0)
        ))
    );
    println!("Save URL: {}", page.urls.save_answer);
    println!("{}", question_table(quiz));
    println!(
        "Answered: {} of {}",
        quiz.answered_count(),
        quiz.questions.len()
    );
    Ok(())
}

pub async fn run_take(args: &TakeArgs) -> Result<PromptOutcome> {
    let page = load_page(&args.data)?;
    let span = info_span!("quiz", quiz_id = page.quiz.id);

    let config = if args.no_autosave {
        AutoSaveConfig::disabled()
    } else {
        AutoSaveConfig::new(args.debounce_ms).context("invalid --debounce-ms")?
    };
    let client_config = ClientConfig::new(&args.base_url)
        .with_csrf_token(args.csrf_token.clone())
        .with_session_cookie(args.session_cookie.clone())
        .with_timeout_secs(args.timeout_secs);
    let client = QuizApiClient::new(client_config).context("create quiz client")?;
    let endpoint = AnswerEndpoint::new(client, page.urls.save_answer.clone());

    let session = QuizSession::start(page, config, endpoint)?;
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();
    let outcome = run_prompt(session, input, &mut stdout)
        .instrument(span)
        .await?;
    Ok(outcome)
}
