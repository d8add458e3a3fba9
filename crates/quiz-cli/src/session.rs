//! A quiz being taken: the chosen question, its saver and navigation.

use std::future::Future;

use quiz_autosave::{AutoSaveConfig, AutoSaver, Phase, SaveEndpoint, SaveFailure};
use quiz_client::{AnswerEndpoint, ClientError};
use quiz_model::{
    Countdown, ErrorNotice, LanguageTags, Question, QuizData, QuizPage, QuizUrls, step_index,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::{Result, SessionError};

/// Server operations a session needs besides saving answers.
pub trait QuizServer: SaveEndpoint<Question> + Clone {
    /// Post the finish form.
    fn finish(&self, url: &str) -> impl Future<Output = std::result::Result<(), ClientError>> + Send;

    /// Absolute form of a page URL.
    fn resolve_url(&self, url: &str) -> String;
}

impl QuizServer for AnswerEndpoint {
    fn finish(&self, url: &str) -> impl Future<Output = std::result::Result<(), ClientError>> + Send {
        self.client().finish_quiz(url)
    }

    fn resolve_url(&self, url: &str) -> String {
        self.client().config().resolve(url)
    }
}

/// State of one quiz attempt.
///
/// Each chosen question gets its own [`AutoSaver`]. Moving to another
/// question first waits for the current saver to finish; if that save
/// fails, the chosen question does not change.
pub struct QuizSession<S> {
    quiz: QuizData,
    urls: QuizUrls,
    tags: LanguageTags,
    countdown: Countdown,
    config: AutoSaveConfig,
    server: S,
    chosen: usize,
    saver: AutoSaver<Question>,
    notice_tx: mpsc::UnboundedSender<ErrorNotice>,
    notices: mpsc::UnboundedReceiver<ErrorNotice>,
    finished: bool,
}

impl<S: QuizServer> QuizSession<S> {
    /// Start a session on the first question.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn start(page: QuizPage, config: AutoSaveConfig, server: S) -> Result<Self> {
        let QuizPage { quiz, urls, tags } = page;
        quiz.validate()?;

        let (notice_tx, notices) = mpsc::unbounded_channel();
        let saver = spawn_saver(config, &server, &tags, &notice_tx);
        info!(
            quiz_id = quiz.id,
            questions = quiz.questions.len(),
            "Started quiz '{}'",
            quiz.name
        );

        Ok(Self {
            countdown: Countdown::start(quiz.time_left),
            quiz,
            urls,
            tags,
            config,
            server,
            chosen: 0,
            saver,
            notice_tx,
            notices,
            finished: false,
        })
    }

    pub fn quiz(&self) -> &QuizData {
        &self.quiz
    }

    pub fn tags(&self) -> &LanguageTags {
        &self.tags
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Index of the chosen question.
    pub fn chosen_index(&self) -> usize {
        self.chosen
    }

    /// The chosen question.
    pub fn chosen(&self) -> &Question {
        &self.quiz.questions[self.chosen]
    }

    /// Save phase of the chosen question.
    pub fn phase(&self) -> Phase {
        self.saver.phase()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Quiz list to go back to once the quiz is over.
    pub fn home_url(&self) -> String {
        self.server.resolve_url(&self.urls.home)
    }

    /// Apply an edit to the chosen question.
    ///
    /// Returns whether the answer changed. Unchanged answers are not sent.
    pub fn edit<F>(&mut self, apply: F) -> Result<bool>
    where
        F: FnOnce(&mut Question) -> quiz_model::Result<()>,
    {
        if self.finished {
            return Err(SessionError::Finished);
        }
        let question = self.quiz.question_mut(self.chosen)?;
        let before = question.clone();
        apply(question)?;
        if question.same_answers(&before) {
            return Ok(false);
        }

        debug!(question_id = question.id, "Answer changed");
        self.saver.notify_edit(question.clone());
        Ok(true)
    }

    /// Select choice `index` of a single-answer question.
    pub fn pick(&mut self, index: usize) -> Result<bool> {
        self.edit(|q| q.set_radio_choice(index))
    }

    /// Flip choice `index` of a multiple-answer or open-answer question.
    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        self.edit(|q| q.toggle_choice(index))
    }

    /// Replace the typed answer of a text question.
    pub fn set_text(&mut self, text: &str) -> Result<bool> {
        self.edit(|q| q.set_text_answer(text))
    }

    /// Move to question `index` once the current answer is saved.
    pub async fn choose(&mut self, index: usize) -> Result<()> {
        if self.finished {
            return Err(SessionError::Finished);
        }
        self.quiz.question(index)?;
        if index == self.chosen {
            return Ok(());
        }

        self.saver.finalize().await?;
        self.saver = spawn_saver(self.config, &self.server, &self.tags, &self.notice_tx);
        self.chosen = index;
        info!(question_id = self.chosen().id, "Moved to question {}", index + 1);
        Ok(())
    }

    /// Move `dir` questions forward (negative for back), wrapping around.
    pub async fn step(&mut self, dir: isize) -> Result<()> {
        match step_index(self.chosen, self.quiz.questions.len(), dir) {
            Some(index) => self.choose(index).await,
            None => Ok(()),
        }
    }

    /// Wait until the current answer is saved.
    pub async fn save(&mut self) -> Result<()> {
        if self.finished {
            return Err(SessionError::Finished);
        }
        self.saver.finalize().await?;
        Ok(())
    }

    /// Save the current answer and finish the quiz.
    pub async fn submit(&mut self) -> Result<()> {
        self.save().await?;
        match &self.urls.finish {
            Some(url) => self.server.finish(url).await?,
            None => debug!("No finish URL, answers are saved"),
        }

        self.finished = true;
        info!(quiz_id = self.quiz.id, "Quiz finished");
        Ok(())
    }

    /// Wait for the current answer to be saved before leaving.
    pub async fn close(self) -> Result<()> {
        self.saver.finalize().await?;
        Ok(())
    }

    /// Notices from background saves that need the user's attention.
    pub fn take_notices(&mut self) -> Vec<ErrorNotice> {
        let mut notices = Vec::new();
        while let Ok(notice) = self.notices.try_recv() {
            notices.push(notice);
        }
        notices
    }
}

impl<S> std::fmt::Debug for QuizSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizSession")
            .field("quiz_id", &self.quiz.id)
            .field("chosen", &self.chosen)
            .field("saver", &self.saver)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

fn spawn_saver<S: QuizServer>(
    config: AutoSaveConfig,
    server: &S,
    tags: &LanguageTags,
    notices: &mpsc::UnboundedSender<ErrorNotice>,
) -> AutoSaver<Question> {
    let tags = tags.clone();
    let notices = notices.clone();
    AutoSaver::spawn(config, server.clone(), move |failure: &SaveFailure| {
        let notice = ErrorNotice::classify(
            failure.error.status,
            failure.error.server_message(),
            failure.explicit(),
            &tags,
        );
        warn!(
            status = ?failure.error.status,
            explicit = failure.explicit(),
            "Save failed: {}",
            notice.message
        );
        // Explicit failures reach the waiting caller as an error.
        if notice.show_dialog && !failure.explicit() && notices.send(notice).is_err() {
            debug!("Session closed, dropping save notice");
        }
    })
}
