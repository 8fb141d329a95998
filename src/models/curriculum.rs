//! Curriculum structure and coverage weights.
//!
//! K_i: Learning outcomes (RA) own assessment criteria (CE); a CE is the
//! leaf unit questions are tagged against.
//! I^R: Coverage weights are optional overrides. Absence means an equal
//! split among siblings, which is a different state from a zero weight.

use serde::{Deserialize, Serialize};

/// Top-level curriculum objective of a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningOutcome {
    pub id: String,
    pub module_id: String,
    pub description: String,
}

impl LearningOutcome {
    pub fn new(
        id: impl Into<String>,
        module_id: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            module_id: module_id.into(),
            description: description.into(),
        }
    }
}

/// Gradable sub-skill under a learning outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentCriterion {
    pub id: String,
    /// Parent learning outcome; must resolve within the supplied set
    pub learning_outcome_id: String,
    pub description: String,
}

impl AssessmentCriterion {
    pub fn new(
        id: impl Into<String>,
        learning_outcome_id: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            learning_outcome_id: learning_outcome_id.into(),
            description: description.into(),
        }
    }
}

/// Explicit share of the exam for one learning outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningOutcomeWeight {
    pub learning_outcome_id: String,
    pub percentage: f64,
}

/// Explicit share of a criterion within its parent learning outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentCriterionWeight {
    pub assessment_criterion_id: String,
    /// Declared parent; must match the criterion's actual parent
    pub learning_outcome_id: String,
    pub percentage_within_learning_outcome: f64,
}

/// Optional weight overrides for coverage planning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageWeights {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_outcome_weights: Option<Vec<LearningOutcomeWeight>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment_criterion_weights: Option<Vec<AssessmentCriterionWeight>>,
}

/// Everything a module contributes to generation: its curriculum tree and
/// the question pool tagged against it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationContext {
    pub learning_outcomes: Vec<LearningOutcome>,
    pub assessment_criteria: Vec<AssessmentCriterion>,
    pub available_questions: Vec<super::Question>,
}
