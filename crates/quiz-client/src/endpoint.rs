//! Save endpoint backed by the quiz API.

use std::future::Future;

use quiz_autosave::{SaveEndpoint, SaveError};
use quiz_model::Question;

use crate::client::QuizApiClient;

/// Saves question answers to the save-answer URL of one quiz session.
#[derive(Debug, Clone)]
pub struct AnswerEndpoint {
    client: QuizApiClient,
    url: String,
}

impl AnswerEndpoint {
    /// Create an endpoint posting to `save_answer_url`.
    pub fn new(client: QuizApiClient, save_answer_url: impl Into<String>) -> Self {
        Self {
            client,
            url: save_answer_url.into(),
        }
    }

    /// The underlying API client.
    pub fn client(&self) -> &QuizApiClient {
        &self.client
    }
}

impl SaveEndpoint<Question> for AnswerEndpoint {
    fn save(&self, question: &Question) -> impl Future<Output = Result<(), SaveError>> + Send {
        let request = question.answer_request();
        async move {
            self.client
                .save_answer(&self.url, &request)
                .await
                .map_err(SaveError::from)
        }
    }
}
