//! Page URLs and language tags.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::quiz::QuizData;

/// Everything the server embeds in a quiz page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizPage {
    pub quiz: QuizData,
    pub urls: QuizUrls,
    #[serde(default)]
    pub tags: LanguageTags,
}

impl QuizPage {
    /// Parse a page document and validate its quiz data.
    pub fn from_json(json: &str) -> Result<Self> {
        let page: Self = serde_json::from_str(json)?;
        page.quiz.validate()?;
        Ok(page)
    }
}

/// Endpoints the quiz page talks to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizUrls {
    /// Where answers are posted.
    pub save_answer: String,
    /// Quiz list to return to once the quiz is over.
    pub home: String,
    /// Where the finish form is posted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish: Option<String>,
}

/// Translated UI strings.
///
/// Missing tags fall back to English.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LanguageTags {
    pub question: String,
    pub finish: String,
    pub ok: String,
    pub no: String,
    pub error: String,
    pub cancel: String,
    pub next: String,
    pub previous: String,
    pub network_error: String,
    pub no_time_left: String,
    pub quiz_is_over: String,
}

impl Default for LanguageTags {
    fn default() -> Self {
        Self {
            question: "Question".to_string(),
            finish: "Finish".to_string(),
            ok: "OK".to_string(),
            no: "No".to_string(),
            error: "Error".to_string(),
            cancel: "Cancel".to_string(),
            next: "Next".to_string(),
            previous: "Previous".to_string(),
            network_error: "Network error".to_string(),
            no_time_left: "No time left".to_string(),
            quiz_is_over: "Quiz is over".to_string(),
        }
    }
}
