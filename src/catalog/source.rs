//! Module catalog interface and on-disk record format.
//!
//! - K_i: A catalog answers "what curriculum and questions belong to this
//!   module", nothing more
//! - B_i: Catalog files are well-formed JSON (might fail)

use crate::models::{AssessmentCriterion, GenerationContext, LearningOutcome, Question};
use serde::{Deserialize, Serialize};

/// Source of per-module generation data.
pub trait ModuleCatalog: Send + Sync {
    /// Curriculum and candidate pool of a module, `None` when the module has
    /// no learning outcomes.
    fn resolve(&self, module_id: &str) -> Option<GenerationContext>;

    /// Known module ids, in first-seen order.
    fn module_ids(&self) -> Vec<String>;
}

/// A question as stored in a catalog: the question plus its owning module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleQuestion {
    pub module_id: String,

    #[serde(flatten)]
    pub question: Question,
}

impl ModuleQuestion {
    pub fn new(module_id: impl Into<String>, question: Question) -> Self {
        Self {
            module_id: module_id.into(),
            question,
        }
    }
}

/// Contents of one catalog JSON file. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFile {
    #[serde(default)]
    pub learning_outcomes: Vec<LearningOutcome>,

    #[serde(default)]
    pub assessment_criteria: Vec<AssessmentCriterion>,

    #[serde(default)]
    pub questions: Vec<ModuleQuestion>,
}
