//! Request and response payloads of the generate/validate operations.
//!
//! K_i: Responses carry either an exam or a non-empty error list, never
//! both and never neither.

use super::{
    AssessmentCriterion, CoverageWeights, Difficulty, Exam, LearningOutcome, Question,
    QuestionDistribution,
};
use serde::{Deserialize, Serialize};

/// Curriculum framework whose extra generation rules apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameworkId {
    /// Spanish vocational training (FP)
    #[default]
    Es,
}

impl std::str::FromStr for FrameworkId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "es" => Ok(Self::Es),
            other => Err(other.to_string()),
        }
    }
}

/// Full generation request: the caller supplies the pool and curriculum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateExamRequest {
    pub exam_id: String,
    pub name: String,
    pub module_id: String,
    pub difficulty: Difficulty,

    /// Requested number of questions; any JSON number is accepted here,
    /// whole numbers ≥ 1 are enforced by generation
    pub question_count: f64,

    /// Candidate pool, in caller-defined order
    pub available_questions: Vec<Question>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<QuestionDistribution>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_outcomes: Option<Vec<LearningOutcome>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment_criteria: Option<Vec<AssessmentCriterion>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_weights: Option<CoverageWeights>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework_id: Option<FrameworkId>,
}

impl GenerateExamRequest {
    /// Coverage mode needs both a non-empty outcome list and criterion list.
    pub fn has_coverage_context(&self) -> bool {
        let non_empty = |items: Option<usize>| items.unwrap_or(0) > 0;
        non_empty(self.learning_outcomes.as_ref().map(Vec::len))
            && non_empty(self.assessment_criteria.as_ref().map(Vec::len))
    }
}

/// Generation request that names a module instead of shipping its data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFromModuleRequest {
    /// Filled with a fresh UUID when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_id: Option<String>,
    pub name: String,
    pub module_id: String,
    pub difficulty: Difficulty,
    pub question_count: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<QuestionDistribution>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_weights: Option<CoverageWeights>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework_id: Option<FrameworkId>,
}

/// Either shape of generate request.
///
/// K_i: A payload carrying `availableQuestions` is a full request, anything
/// else is a module request. Parse errors name the field of that shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GenerateRequest {
    Full(GenerateExamRequest),
    FromModule(GenerateFromModuleRequest),
}

impl<'de> Deserialize<'de> for GenerateRequest {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let value = serde_json::Value::deserialize(deserializer)?;
        if value.get("availableQuestions").is_some() {
            serde_json::from_value(value).map(Self::Full).map_err(D::Error::custom)
        } else {
            serde_json::from_value(value)
                .map(Self::FromModule)
                .map_err(D::Error::custom)
        }
    }
}

/// Result of a generate call, as sent over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenerateResponse {
    Exam { exam: Exam },
    Errors { errors: Vec<String> },
}

impl GenerateResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Exam { .. })
    }

    pub fn errors(&self) -> &[String] {
        match self {
            Self::Exam { .. } => &[],
            Self::Errors { errors } => errors,
        }
    }
}

impl From<std::result::Result<Exam, Vec<String>>> for GenerateResponse {
    fn from(result: std::result::Result<Exam, Vec<String>>) -> Self {
        match result {
            Ok(exam) => Self::Exam { exam },
            Err(errors) => Self::Errors { errors },
        }
    }
}

/// Validation request: an exam as submitted by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateExamRequest {
    pub exam: Exam,
}

impl ValidateExamRequest {
    /// Accept either `{"exam": ...}` or a bare exam. Parse errors point at
    /// the offending exam field.
    pub fn from_payload(value: serde_json::Value) -> serde_json::Result<Self> {
        if value.get("exam").is_some() {
            serde_json::from_value(value)
        } else {
            serde_json::from_value(value).map(|exam| Self { exam })
        }
    }
}

/// Validation response; an empty list means the exam is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidateExamResponse {
    pub errors: Vec<String>,
}

impl ValidateExamResponse {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}
