//! Question types for examgen.
//!
//! K_i: A question is a closed set of variants dispatched on the `type` tag.
//! Variant-specific fields (options, boolean answer, expected text) only
//! exist on the variant that owns them.

use serde::{Deserialize, Serialize};

/// How hard a question (or a whole exam) is meant to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Whether a question probes theoretical knowledge or practical application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionIntent {
    Theoretical,
    Practical,
}

impl QuestionIntent {
    /// Lowercase name used in user-facing messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Theoretical => "theoretical",
            Self::Practical => "practical",
        }
    }
}

/// A selectable answer of a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    pub id: String,
    pub text: String,
    pub is_correct: bool,
}

impl AnswerOption {
    pub fn new(id: impl Into<String>, text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            is_correct,
        }
    }
}

/// Type-specific payload of a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuestionKind {
    /// Pick one of several options
    MultipleChoice { options: Vec<AnswerOption> },
    /// Decide whether a statement holds
    #[serde(rename_all = "camelCase")]
    TrueFalse { correct_answer: bool },
    /// Free text compared against an expected answer
    #[serde(rename_all = "camelCase")]
    ShortAnswer { expected_answer: String },
}

/// A candidate or selected exam question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Unique identifier for this question
    pub id: String,

    /// Display text
    pub text: String,

    pub difficulty: Difficulty,

    /// Assessment criteria this question is tagged against
    pub ce_ids: Vec<String>,

    pub intent: QuestionIntent,

    /// Optional point value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<f64>,

    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl Question {
    /// Create a true/false question, the simplest variant.
    pub fn true_false(
        id: impl Into<String>,
        text: impl Into<String>,
        intent: QuestionIntent,
        ce_ids: &[&str],
        correct_answer: bool,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            difficulty: Difficulty::Easy,
            ce_ids: ce_ids.iter().map(|ce| ce.to_string()).collect(),
            intent,
            points: None,
            kind: QuestionKind::TrueFalse { correct_answer },
        }
    }

    /// Create a multiple-choice question.
    pub fn multiple_choice(
        id: impl Into<String>,
        text: impl Into<String>,
        intent: QuestionIntent,
        ce_ids: &[&str],
        options: Vec<AnswerOption>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            difficulty: Difficulty::Easy,
            ce_ids: ce_ids.iter().map(|ce| ce.to_string()).collect(),
            intent,
            points: None,
            kind: QuestionKind::MultipleChoice { options },
        }
    }

    /// Create a short-answer question.
    pub fn short_answer(
        id: impl Into<String>,
        text: impl Into<String>,
        intent: QuestionIntent,
        ce_ids: &[&str],
        expected_answer: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            difficulty: Difficulty::Easy,
            ce_ids: ce_ids.iter().map(|ce| ce.to_string()).collect(),
            intent,
            points: None,
            kind: QuestionKind::ShortAnswer {
                expected_answer: expected_answer.into(),
            },
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_points(mut self, points: f64) -> Self {
        self.points = Some(points);
        self
    }

    /// Options of a multiple-choice question; `None` for other variants.
    pub fn options(&self) -> Option<&[AnswerOption]> {
        match &self.kind {
            QuestionKind::MultipleChoice { options } => Some(options),
            _ => None,
        }
    }

    /// Point value, counting an absent value as one point.
    pub fn points_or_default(&self) -> f64 {
        self.points.unwrap_or(1.0)
    }
}
