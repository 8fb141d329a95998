//! Framework-specific generation rules.
//!
//! I^R: Each curriculum framework may add its own checks on a generate
//! request before any selection happens.

use crate::models::{FrameworkId, GenerateExamRequest};

/// Extra request checks imposed by a curriculum framework.
pub trait FrameworkRules: Send + Sync {
    /// Framework these rules belong to.
    fn id(&self) -> FrameworkId;

    /// Human-readable findings; empty when the request is acceptable.
    fn validate_generate_request(&self, request: &GenerateExamRequest) -> Vec<String>;
}

/// Spanish vocational training (FP). Adds no checks on top of the core.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpainFrameworkRules;

impl FrameworkRules for SpainFrameworkRules {
    fn id(&self) -> FrameworkId {
        FrameworkId::Es
    }

    fn validate_generate_request(&self, _request: &GenerateExamRequest) -> Vec<String> {
        Vec::new()
    }
}

static SPAIN: SpainFrameworkRules = SpainFrameworkRules;

/// Rules for a framework, `es` when none is named.
pub fn resolve_framework_rules(framework: Option<FrameworkId>) -> &'static dyn FrameworkRules {
    match framework.unwrap_or_default() {
        FrameworkId::Es => &SPAIN,
    }
}
