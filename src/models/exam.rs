//! Exam and distribution types.
//!
//! K_i: Question order is presentation order.
//! B_i: Structural invariants (non-empty, unique ids, well-formed choices,
//! distribution within tolerance) are checked by `validation`, not by the
//! type system, so that raw payloads can be reported on.

use super::{Difficulty, Question, QuestionIntent};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Declared theoretical/practical ratio plus allowed deviation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionByCount {
    pub theoretical_pct: f64,
    pub practical_pct: f64,

    /// Allowed deviation in percentage points (default: 0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance_pct: Option<f64>,
}

impl DistributionByCount {
    pub fn new(theoretical_pct: f64, practical_pct: f64) -> Self {
        Self {
            theoretical_pct,
            practical_pct,
            tolerance_pct: None,
        }
    }

    pub fn with_tolerance(mut self, tolerance_pct: f64) -> Self {
        self.tolerance_pct = Some(tolerance_pct);
        self
    }

    pub fn tolerance_or_default(&self) -> f64 {
        self.tolerance_pct.unwrap_or(0.0)
    }

    /// Target percentage for one side of the split.
    pub fn target_for(&self, intent: QuestionIntent) -> f64 {
        match intent {
            QuestionIntent::Theoretical => self.theoretical_pct,
            QuestionIntent::Practical => self.practical_pct,
        }
    }
}

/// Target question distribution of an exam.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDistribution {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_count: Option<DistributionByCount>,
}

impl QuestionDistribution {
    pub fn by_count(by_count: DistributionByCount) -> Self {
        Self {
            by_count: Some(by_count),
        }
    }
}

/// An assembled (or submitted) exam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub id: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub difficulty: Difficulty,

    /// Owning module
    pub module_id: String,

    /// Ordered questions (insertion order = presentation order)
    pub questions: Vec<Question>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<QuestionDistribution>,

    /// Creation time, stamped by callers that persist or publish the exam
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Exam {
    /// Declared by-count distribution, if any.
    pub fn by_count(&self) -> Option<&DistributionByCount> {
        self.distribution.as_ref()?.by_count.as_ref()
    }

    /// Number of questions with the given intent.
    pub fn count_intent(&self, intent: QuestionIntent) -> usize {
        self.questions.iter().filter(|q| q.intent == intent).count()
    }
}
