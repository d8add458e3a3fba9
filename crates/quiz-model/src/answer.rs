//! Save-answer request payload.

use serde::{Deserialize, Serialize};

/// Body of a save-answer request: every answer slot of one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub answers: Vec<ChoiceAnswer>,
}

/// Answer state of one choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceAnswer {
    pub id: u64,
    pub chosen: bool,
    /// Omitted for choice questions; the server leaves the stored text alone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_answer: Option<String>,
}
