//! Shared fixtures for quiz-cli integration tests.

#![allow(dead_code)]

use std::future::Future;
use std::sync::{Arc, Mutex};

use quiz_autosave::{SaveEndpoint, SaveError};
use quiz_cli::QuizServer;
use quiz_client::ClientError;
use quiz_model::{Question, QuizPage};
use serde_json::json;

pub const PAGE_JSON: &str = r#"{
    "quiz": {
        "id": 77,
        "name": "Midterm",
        "timeLeft": 1795,
        "questions": [
            {
                "id": 1,
                "text": "<p>2 + 2 = ?</p>",
                "type": 0,
                "choices": [
                    {"id": 101, "chosen": false, "text": "3"},
                    {"id": 102, "chosen": false, "text": "4"},
                    {"id": 103, "chosen": false, "text": "5"}
                ]
            },
            {
                "id": 2,
                "text": "<p>Solve for x</p>",
                "type": 2,
                "choices": [
                    {"id": 201, "chosen": false, "userAnswer": null}
                ]
            },
            {
                "id": 3,
                "text": "<p>Primes</p>",
                "type": 1,
                "choices": [
                    {"id": 301, "chosen": true, "text": "2"},
                    {"id": 302, "chosen": false, "text": "9"}
                ]
            }
        ]
    },
    "urls": {
        "save_answer": "/quiz/77/save/",
        "home": "/quizzes/",
        "finish": "/quiz/77/finish/"
    }
}"#;

pub fn page() -> QuizPage {
    QuizPage::from_json(PAGE_JSON).unwrap()
}

#[derive(Default)]
struct MockState {
    saved: Vec<Question>,
    finished: Vec<String>,
    fail_status: Option<u16>,
}

/// In-memory server recording saves and finish requests.
#[derive(Clone, Default)]
pub struct MockServer {
    state: Arc<Mutex<MockState>>,
}

impl MockServer {
    /// Make every save fail with `status` until cleared.
    pub fn fail_with(&self, status: Option<u16>) {
        self.state.lock().unwrap().fail_status = status;
    }

    pub fn saved(&self) -> Vec<Question> {
        self.state.lock().unwrap().saved.clone()
    }

    pub fn finished(&self) -> Vec<String> {
        self.state.lock().unwrap().finished.clone()
    }
}

impl SaveEndpoint<Question> for MockServer {
    fn save(&self, value: &Question) -> impl Future<Output = Result<(), SaveError>> + Send {
        let mut state = self.state.lock().unwrap();
        let result = match state.fail_status {
            Some(status) => Err(SaveError::status(
                status,
                json!({"message": format!("failed with {status}")}),
            )),
            None => {
                state.saved.push(value.clone());
                Ok(())
            }
        };
        async move { result }
    }
}

impl QuizServer for MockServer {
    fn finish(&self, url: &str) -> impl Future<Output = Result<(), ClientError>> + Send {
        self.state.lock().unwrap().finished.push(url.to_string());
        async { Ok(()) }
    }

    fn resolve_url(&self, url: &str) -> String {
        format!("https://quiz.test{url}")
    }
}
