//! Quiz, question and choice types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::answer::{AnswerRequest, ChoiceAnswer};
use crate::error::{ModelError, Result};

/// How a question is answered.
///
/// Serialized as the integer code used by the quiz API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum QuestionKind {
    /// Exactly one choice may be chosen.
    SingleAnswer,
    /// Any number of choices may be chosen.
    MultipleAnswers,
    /// Short typed answer, checked by the server.
    TextAnswer,
    /// Options graded by hand; any number may be chosen.
    OpenAnswer,
}

impl QuestionKind {
    /// Whether the answer is typed text rather than chosen options.
    #[inline]
    pub fn takes_text(self) -> bool {
        matches!(self, Self::TextAnswer)
    }

    /// Whether choices are flipped one at a time.
    #[inline]
    pub fn toggles(self) -> bool {
        matches!(self, Self::MultipleAnswers | Self::OpenAnswer)
    }

    /// Get a human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::SingleAnswer => "single answer",
            Self::MultipleAnswers => "multiple answers",
            Self::TextAnswer => "text answer",
            Self::OpenAnswer => "open answer",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<u8> for QuestionKind {
    type Error = ModelError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Self::SingleAnswer),
            1 => Ok(Self::MultipleAnswers),
            2 => Ok(Self::TextAnswer),
            3 => Ok(Self::OpenAnswer),
            other => Err(ModelError::UnknownKind(other)),
        }
    }
}

impl From<QuestionKind> for u8 {
    fn from(kind: QuestionKind) -> Self {
        match kind {
            QuestionKind::SingleAnswer => 0,
            QuestionKind::MultipleAnswers => 1,
            QuestionKind::TextAnswer => 2,
            QuestionKind::OpenAnswer => 3,
        }
    }
}

/// One answer slot of a question.
///
/// Choice questions use `chosen`; text questions keep the typed answer in
/// `user_answer` of their first choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub id: u64,
    #[serde(default)]
    pub chosen: bool,
    /// Rendered choice text (choice questions only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_answer: Option<String>,
}

/// A question of the running quiz, including the user's current answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u64,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub choices: Vec<Choice>,
}

impl Question {
    /// Build the save-answer payload for this question.
    pub fn answer_request(&self) -> AnswerRequest {
        AnswerRequest {
            answers: self
                .choices
                .iter()
                .map(|c| ChoiceAnswer {
                    id: c.id,
                    chosen: c.chosen,
                    user_answer: c.user_answer.clone(),
                })
                .collect(),
        }
    }

    /// The typed answer of a text question.
    pub fn text_answer(&self) -> Option<&str> {
        self.choices.first().and_then(|c| c.user_answer.as_deref())
    }

    /// Whether the user has given any answer.
    pub fn is_answered(&self) -> bool {
        if self.kind.takes_text() {
            self.text_answer().is_some_and(|a| !a.is_empty())
        } else {
            self.choices.iter().any(|c| c.chosen)
        }
    }

    /// Whether `other` holds the same answer as `self`.
    ///
    /// Used to skip saving when an edit changed nothing.
    pub fn same_answers(&self, other: &Question) -> bool {
        if self.kind.takes_text() {
            return self.text_answer() == other.text_answer();
        }
        self.choices.len() == other.choices.len()
            && self
                .choices
                .iter()
                .zip(&other.choices)
                .all(|(a, b)| a.chosen == b.chosen)
    }

    /// Choose exactly one option of a single-answer question.
    pub fn set_radio_choice(&mut self, index: usize) -> Result<()> {
        self.require_kind(QuestionKind::SingleAnswer, "pick a single choice")?;
        self.check_choice(index)?;
        for (i, choice) in self.choices.iter_mut().enumerate() {
            choice.chosen = i == index;
        }
        Ok(())
    }

    /// Flip one option of a multiple-answer or open-answer question.
    pub fn toggle_choice(&mut self, index: usize) -> Result<()> {
        if !self.kind.toggles() {
            return Err(ModelError::WrongKind {
                operation: "toggle a choice",
                kind: self.kind,
            });
        }
        self.check_choice(index)?;
        let choice = &mut self.choices[index];
        choice.chosen = !choice.chosen;
        Ok(())
    }

    /// Replace the typed answer of a text question.
    pub fn set_text_answer(&mut self, text: impl Into<String>) -> Result<()> {
        if !self.kind.takes_text() {
            return Err(ModelError::WrongKind {
                operation: "type an answer",
                kind: self.kind,
            });
        }
        let question_id = self.id;
        let first = self
            .choices
            .first_mut()
            .ok_or(ModelError::NoChoices { question_id })?;
        first.user_answer = Some(text.into());
        Ok(())
    }

    fn require_kind(&self, kind: QuestionKind, operation: &'static str) -> Result<()> {
        if self.kind == kind {
            Ok(())
        } else {
            Err(ModelError::WrongKind {
                operation,
                kind: self.kind,
            })
        }
    }

    fn check_choice(&self, index: usize) -> Result<()> {
        if index < self.choices.len() {
            Ok(())
        } else {
            Err(ModelError::ChoiceOutOfRange {
                question_id: self.id,
                index,
                len: self.choices.len(),
            })
        }
    }
}

/// Quiz data as embedded in the quiz page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizData {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    /// Seconds left when the page was rendered. May be negative.
    pub time_left: i64,
    pub questions: Vec<Question>,
}

impl QuizData {
    /// Parse and validate quiz data JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: Self = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }

    /// Check that the quiz can be taken.
    pub fn validate(&self) -> Result<()> {
        if self.questions.is_empty() {
            return Err(ModelError::NoQuestions { quiz_id: self.id });
        }
        if let Some(q) = self
            .questions
            .iter()
            .find(|q| q.kind.takes_text() && q.choices.is_empty())
        {
            return Err(ModelError::NoChoices { question_id: q.id });
        }
        Ok(())
    }

    /// Question at `index`.
    pub fn question(&self, index: usize) -> Result<&Question> {
        self.questions
            .get(index)
            .ok_or(ModelError::QuestionOutOfRange {
                index,
                len: self.questions.len(),
            })
    }

    /// Mutable question at `index`.
    pub fn question_mut(&mut self, index: usize) -> Result<&mut Question> {
        let len = self.questions.len();
        self.questions
            .get_mut(index)
            .ok_or(ModelError::QuestionOutOfRange { index, len })
    }

    /// Position of the question with the given id.
    pub fn position_of(&self, question_id: u64) -> Option<usize> {
        self.questions.iter().position(|q| q.id == question_id)
    }

    /// Number of answered questions.
    pub fn answered_count(&self) -> usize {
        self.questions.iter().filter(|q| q.is_answered()).count()
    }

    /// Whether every question is answered.
    pub fn is_answered(&self) -> bool {
        self.questions.iter().all(Question::is_answered)
    }
}

/// Move `dir` steps from `current` in a list of `len`, wrapping around.
///
/// Returns `None` for an empty list.
pub fn step_index(current: usize, len: usize, dir: isize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let len = len as isize;
    Some((current as isize + dir).rem_euclid(len) as usize)
}
