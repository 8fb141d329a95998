//! Exam generation entry points.
//!
//! Flow:
//! Request → count/framework/capacity checks → mode selection
//!   coverage:     plan_coverage → select_by_coverage
//!   distribution: select_by_distribution
//!   plain:        first N candidates
//! → assemble exam → validate_exam → exam or errors
//!
//! K_i: Every call is a pure function of its inputs. A failing phase stops
//! the pipeline and only that phase's errors are returned.

use super::resolve_framework_rules;
use crate::catalog::ModuleCatalog;
use crate::models::{
    DistributionByCount, Exam, ExamgenError, FrameworkId, GenerateExamRequest, GenerateFromModuleRequest,
    GenerateRequest, GenerateResponse, Question, Result, ValidateExamRequest,
    ValidateExamResponse,
};
use crate::planning::plan_coverage;
use crate::selection::{select_by_coverage, select_by_distribution};
use crate::validation::validate_exam;
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// How candidates are picked for a request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionMode {
    /// Per-criterion targets from the curriculum tree
    Coverage,
    /// Flat theoretical/practical split
    Distribution(DistributionByCount),
    /// First N candidates in pool order
    Truncation,
}

impl SelectionMode {
    /// Coverage needs outcomes and criteria; distribution needs `byCount`.
    pub fn for_request(request: &GenerateExamRequest) -> Self {
        if request.has_coverage_context() {
            return Self::Coverage;
        }
        match request.distribution.and_then(|d| d.by_count) {
            Some(by_count) => Self::Distribution(by_count),
            None => Self::Truncation,
        }
    }
}

/// Generate an exam from a full request.
pub fn generate_exam(request: &GenerateExamRequest) -> std::result::Result<Exam, Vec<String>> {
    let Some(question_count) = whole_question_count(request.question_count) else {
        return Err(vec!["questionCount must be an integer greater than 0.".to_string()]);
    };

    let framework_errors =
        resolve_framework_rules(request.framework_id).validate_generate_request(request);
    if !framework_errors.is_empty() {
        return Err(framework_errors);
    }

    if request.available_questions.len() < question_count {
        return Err(vec![
            "Not enough available questions to satisfy questionCount.".to_string(),
        ]);
    }

    let mode = SelectionMode::for_request(request);
    debug!(
        exam_id = %request.exam_id,
        question_count,
        candidates = request.available_questions.len(),
        ?mode,
        "Selecting questions"
    );

    let questions = select_questions(request, question_count, mode)?;

    let exam = Exam {
        id: request.exam_id.clone(),
        name: request.name.clone(),
        description: None,
        difficulty: request.difficulty,
        module_id: request.module_id.clone(),
        questions,
        distribution: request.distribution,
        created_at: None,
    };

    let validation_errors = validate_exam(&exam);
    if !validation_errors.is_empty() {
        return Err(validation_errors);
    }

    Ok(exam)
}

/// `value` as a count when it is a whole number ≥ 1.
fn whole_question_count(value: f64) -> Option<usize> {
    let whole = value.is_finite() && value.fract() == 0.0;
    if whole && value >= 1.0 && value <= usize::MAX as f64 {
        Some(value as usize)
    } else {
        None
    }
}

fn select_questions(
    request: &GenerateExamRequest,
    question_count: usize,
    mode: SelectionMode,
) -> std::result::Result<Vec<Question>, Vec<String>> {
    let available = &request.available_questions;

    match mode {
        SelectionMode::Coverage => {
            let targets = plan_coverage(
                question_count,
                request.learning_outcomes.as_deref().unwrap_or_default(),
                request.assessment_criteria.as_deref().unwrap_or_default(),
                request.coverage_weights.as_ref(),
            )?;
            select_by_coverage(question_count, available, &targets).into_result()
        }
        SelectionMode::Distribution(by_count) => {
            select_by_distribution(question_count as i64, available, &by_count)
        }
        SelectionMode::Truncation => Ok(available.iter().take(question_count).cloned().collect()),
    }
}

/// Validate a submitted exam. Never fails; an empty list means valid.
pub fn validate_exam_request(request: &ValidateExamRequest) -> ValidateExamResponse {
    ValidateExamResponse {
        errors: validate_exam(&request.exam),
    }
}

/// Fill a module-based request from the catalog.
///
/// B_i(module exists) → Result
pub fn resolve_module_request(
    request: GenerateFromModuleRequest,
    catalog: &dyn ModuleCatalog,
) -> Result<GenerateExamRequest> {
    let context = catalog
        .resolve(&request.module_id)
        .ok_or_else(|| ExamgenError::ModuleNotFound(request.module_id.clone()))?;

    Ok(GenerateExamRequest {
        exam_id: request
            .exam_id
            .unwrap_or_else(|| Uuid::new_v4().to_string()),
        name: request.name,
        module_id: request.module_id,
        difficulty: request.difficulty,
        question_count: request.question_count,
        available_questions: context.available_questions,
        distribution: request.distribution,
        learning_outcomes: Some(context.learning_outcomes),
        assessment_criteria: Some(context.assessment_criteria),
        coverage_weights: request.coverage_weights,
        framework_id: request.framework_id,
    })
}

/// Generation service bound to a module catalog and a default framework.
pub struct ExamGenerator<C: ModuleCatalog> {
    catalog: C,
    default_framework: FrameworkId,
    stamp_created_at: bool,
}

impl<C: ModuleCatalog> ExamGenerator<C> {
    /// Create a new generator.
    pub fn new(catalog: C, default_framework: FrameworkId) -> Self {
        Self {
            catalog,
            default_framework,
            stamp_created_at: false,
        }
    }

    /// Stamp `createdAt` on every generated exam.
    pub fn with_created_at(mut self, stamp: bool) -> Self {
        self.stamp_created_at = stamp;
        self
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Handle either request shape.
    ///
    /// Business failures come back as `GenerateResponse::Errors`; only an
    /// unknown module is an `Err`.
    pub fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let mut request = match request {
            GenerateRequest::Full(request) => request,
            GenerateRequest::FromModule(request) => resolve_module_request(request, &self.catalog)?,
        };
        request.framework_id.get_or_insert(self.default_framework);

        let mut result = generate_exam(&request);
        if self.stamp_created_at {
            if let Ok(exam) = &mut result {
                exam.created_at = Some(Utc::now());
            }
        }

        let response = GenerateResponse::from(result);
        match &response {
            GenerateResponse::Exam { exam } => info!(
                exam_id = %exam.id,
                module_id = %exam.module_id,
                questions = exam.questions.len(),
                "Exam generated"
            ),
            GenerateResponse::Errors { errors } => warn!(
                exam_id = %request.exam_id,
                errors = errors.len(),
                "Exam generation rejected"
            ),
        }

        Ok(response)
    }

    /// Validate a submitted exam.
    pub fn validate(&self, request: &ValidateExamRequest) -> ValidateExamResponse {
        let response = validate_exam_request(request);
        debug!(
            exam_id = %request.exam.id,
            errors = response.errors.len(),
            "Exam validated"
        );
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::models::{
        AssessmentCriterion, CoverageWeights, Difficulty, DistributionByCount, LearningOutcome,
        LearningOutcomeWeight, QuestionDistribution, QuestionIntent,
    };
    use std::collections::HashMap;

    fn question(id: &str, intent: QuestionIntent) -> Question {
        Question::true_false(id, format!("Question {id}"), intent, &["ce-1"], true)
    }

    fn request(question_count: f64, available_questions: Vec<Question>) -> GenerateExamRequest {
        GenerateExamRequest {
            exam_id: "exam-1".to_string(),
            name: "Generated exam".to_string(),
            module_id: "module-1".to_string(),
            difficulty: Difficulty::Easy,
            question_count,
            available_questions,
            distribution: None,
            learning_outcomes: None,
            assessment_criteria: None,
            coverage_weights: None,
            framework_id: None,
        }
    }

    fn outcomes(ids: &[&str]) -> Vec<LearningOutcome> {
        ids.iter()
            .map(|id| LearningOutcome::new(*id, "module-1", format!("RA {id}")))
            .collect()
    }

    fn criteria(pairs: &[(&str, &str)]) -> Vec<AssessmentCriterion> {
        pairs
            .iter()
            .map(|(id, lo)| AssessmentCriterion::new(*id, *lo, format!("CE {id}")))
            .collect()
    }

    fn ce_counts(exam: &Exam) -> HashMap<&str, usize> {
        let mut counts = HashMap::new();
        for question in &exam.questions {
            for ce_id in &question.ce_ids {
                *counts.entry(ce_id.as_str()).or_insert(0) += 1;
            }
        }
        counts
    }

    #[test]
    fn test_generates_with_requested_distribution() {
        let mut req = request(
            4.0,
            vec![
                question("q-1", QuestionIntent::Theoretical),
                question("q-2", QuestionIntent::Theoretical),
                question("q-3", QuestionIntent::Practical),
                question("q-4", QuestionIntent::Practical),
            ],
        );
        req.distribution = Some(QuestionDistribution::by_count(
            DistributionByCount::new(50.0, 50.0).with_tolerance(0.0),
        ));

        let exam = generate_exam(&req).unwrap();
        assert_eq!(exam.questions.len(), 4);
        assert_eq!(exam.distribution, req.distribution);
        assert!(validate_exam(&exam).is_empty());
    }

    #[test]
    fn test_not_enough_practical_questions() {
        let mut req = request(
            3.0,
            vec![
                question("q-1", QuestionIntent::Theoretical),
                question("q-2", QuestionIntent::Theoretical),
                question("q-3", QuestionIntent::Theoretical),
            ],
        );
        req.distribution = Some(QuestionDistribution::by_count(DistributionByCount::new(0.0, 100.0)));

        let errors = generate_exam(&req).unwrap_err();
        assert!(errors.contains(&"Not enough practical questions. Required 3, found 0.".to_string()));
    }

    #[test]
    fn test_equal_default_weights_cover_every_criterion() {
        let mut req = request(
            4.0,
            vec![
                Question::true_false("q-1", "Q1", QuestionIntent::Theoretical, &["ce-1"], true),
                Question::true_false("q-2", "Q2", QuestionIntent::Theoretical, &["ce-2"], true),
                Question::true_false("q-3", "Q3", QuestionIntent::Practical, &["ce-3"], true),
                Question::true_false("q-4", "Q4", QuestionIntent::Practical, &["ce-4"], true),
            ],
        );
        req.learning_outcomes = Some(outcomes(&["ra-1", "ra-2"]));
        req.assessment_criteria = Some(criteria(&[
            ("ce-1", "ra-1"),
            ("ce-2", "ra-1"),
            ("ce-3", "ra-2"),
            ("ce-4", "ra-2"),
        ]));

        let exam = generate_exam(&req).unwrap();
        let counts = ce_counts(&exam);
        assert_eq!(counts.len(), 4);
        for ce in ["ce-1", "ce-2", "ce-3", "ce-4"] {
            assert_eq!(counts[ce], 1, "{ce}");
        }
    }

    #[test]
    fn test_honors_explicit_outcome_weights() {
        let mut req = request(
            4.0,
            vec![
                Question::true_false("q-1", "Q1", QuestionIntent::Theoretical, &["ce-1"], true),
                Question::true_false("q-2", "Q2", QuestionIntent::Theoretical, &["ce-1"], true),
                Question::true_false("q-3", "Q3", QuestionIntent::Theoretical, &["ce-1"], true),
                Question::true_false("q-4", "Q4", QuestionIntent::Practical, &["ce-2"], true),
            ],
        );
        req.learning_outcomes = Some(outcomes(&["ra-1", "ra-2"]));
        req.assessment_criteria = Some(criteria(&[("ce-1", "ra-1"), ("ce-2", "ra-2")]));
        req.coverage_weights = Some(CoverageWeights {
            learning_outcome_weights: Some(vec![
                LearningOutcomeWeight {
                    learning_outcome_id: "ra-1".to_string(),
                    percentage: 75.0,
                },
                LearningOutcomeWeight {
                    learning_outcome_id: "ra-2".to_string(),
                    percentage: 25.0,
                },
            ]),
            assessment_criterion_weights: None,
        });

        let exam = generate_exam(&req).unwrap();
        let counts = ce_counts(&exam);
        assert_eq!(counts["ce-1"], 3);
        assert_eq!(counts["ce-2"], 1);
    }

    #[test]
    fn test_question_count_must_be_positive() {
        for count in [0.0, -3.0, 2.5, f64::NAN, f64::INFINITY] {
            let errors = generate_exam(&request(count, vec![])).unwrap_err();
            assert_eq!(errors, vec!["questionCount must be an integer greater than 0."]);
        }
    }

    #[test]
    fn test_whole_float_count_is_accepted() {
        let exam = generate_exam(&request(1.0, vec![question("q-1", QuestionIntent::Theoretical)])).unwrap();
        assert_eq!(exam.questions.len(), 1);
    }

    #[test]
    fn test_fractional_count_from_json_is_business_error() {
        let json = r#"{
            "examId": "exam-1",
            "name": "Generated exam",
            "moduleId": "module-1",
            "difficulty": "easy",
            "questionCount": 2.5,
            "availableQuestions": []
        }"#;
        let GenerateRequest::Full(req) = serde_json::from_str(json).unwrap() else {
            panic!("expected a full request");
        };
        assert_eq!(
            generate_exam(&req).unwrap_err(),
            vec!["questionCount must be an integer greater than 0."]
        );
    }

    #[test]
    fn test_mode_carries_by_count() {
        let mut req = request(2.0, vec![]);
        assert_eq!(SelectionMode::for_request(&req), SelectionMode::Truncation);

        let by_count = DistributionByCount::new(50.0, 50.0);
        req.distribution = Some(QuestionDistribution::by_count(by_count));
        assert_eq!(SelectionMode::for_request(&req), SelectionMode::Distribution(by_count));

        req.distribution = Some(QuestionDistribution::default());
        assert_eq!(SelectionMode::for_request(&req), SelectionMode::Truncation);
    }

    #[test]
    fn test_pool_smaller_than_count() {
        let errors = generate_exam(&request(2.0, vec![question("q-1", QuestionIntent::Theoretical)])).unwrap_err();
        assert_eq!(errors, vec!["Not enough available questions to satisfy questionCount."]);
    }

    #[test]
    fn test_plain_truncation_keeps_pool_order() {
        let exam = generate_exam(&request(
            2.0,
            vec![
                question("q-3", QuestionIntent::Practical),
                question("q-1", QuestionIntent::Theoretical),
                question("q-2", QuestionIntent::Theoretical),
            ],
        ))
        .unwrap();
        let ids: Vec<&str> = exam.questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["q-3", "q-1"]);
    }

    #[test]
    fn test_unmet_coverage_is_fatal() {
        let mut req = request(
            2.0,
            vec![
                Question::true_false("q-1", "Q1", QuestionIntent::Theoretical, &["ce-1"], true),
                Question::true_false("q-2", "Q2", QuestionIntent::Theoretical, &["ce-1"], true),
            ],
        );
        req.learning_outcomes = Some(outcomes(&["ra-1"]));
        req.assessment_criteria = Some(criteria(&[("ce-1", "ra-1"), ("ce-2", "ra-1")]));

        let errors = generate_exam(&req).unwrap_err();
        assert_eq!(
            errors,
            vec!["Coverage targets could not be fully satisfied: ce-2 (1 short)."]
        );
    }

    #[test]
    fn test_coverage_plan_errors_abort() {
        let mut req = request(1.0, vec![question("q-1", QuestionIntent::Theoretical)]);
        req.learning_outcomes = Some(outcomes(&["ra-1"]));
        req.assessment_criteria = Some(criteria(&[("ce-1", "ra-2")]));

        let errors = generate_exam(&req).unwrap_err();
        assert_eq!(
            errors,
            vec!["Assessment criterion 'ce-1' references unknown learning outcome 'ra-2'."]
        );
    }

    #[test]
    fn test_coverage_mode_takes_precedence_over_distribution() {
        let mut req = request(
            2.0,
            vec![
                Question::true_false("q-1", "Q1", QuestionIntent::Theoretical, &["ce-1"], true),
                Question::true_false("q-2", "Q2", QuestionIntent::Theoretical, &["ce-2"], true),
            ],
        );
        req.learning_outcomes = Some(outcomes(&["ra-1"]));
        req.assessment_criteria = Some(criteria(&[("ce-1", "ra-1"), ("ce-2", "ra-1")]));
        req.distribution = Some(QuestionDistribution::by_count(DistributionByCount::new(0.0, 100.0)));

        assert_eq!(SelectionMode::for_request(&req), SelectionMode::Coverage);
        // The carried-over distribution still gates the result
        let errors = generate_exam(&req).unwrap_err();
        assert_eq!(
            errors,
            vec![
                "Theoretical questions percentage (100.00%) is outside allowed tolerance.",
                "Practical questions percentage (0.00%) is outside allowed tolerance.",
            ]
        );
    }

    #[test]
    fn test_invalid_selected_question_fails_validation() {
        let mut broken = question("q-1", QuestionIntent::Theoretical);
        broken.ce_ids.clear();
        let errors = generate_exam(&request(1.0, vec![broken])).unwrap_err();
        assert_eq!(errors, vec!["Question q-1 must reference at least one CE."]);
    }

    #[test]
    fn test_validate_request_is_idempotent() {
        let exam = generate_exam(&request(1.0, vec![question("q-1", QuestionIntent::Theoretical)])).unwrap();
        let req = ValidateExamRequest { exam };
        assert!(validate_exam_request(&req).is_valid());
        assert!(validate_exam_request(&req).is_valid());
    }

    #[test]
    fn test_generator_resolves_module_requests() {
        let generator = ExamGenerator::new(InMemoryCatalog::seeded(), FrameworkId::Es);
        let request = GenerateRequest::FromModule(GenerateFromModuleRequest {
            exam_id: None,
            name: "Seeded exam".to_string(),
            module_id: "module-1".to_string(),
            difficulty: Difficulty::Medium,
            question_count: 4.0,
            distribution: None,
            coverage_weights: None,
            framework_id: None,
        });

        let response = generator.generate(request).unwrap();
        let GenerateResponse::Exam { exam } = response else {
            panic!("expected an exam, got {response:?}");
        };
        assert_eq!(exam.questions.len(), 4);
        assert!(Uuid::parse_str(&exam.id).is_ok());
        let counts = ce_counts(&exam);
        for ce in ["ce-1", "ce-2", "ce-3", "ce-4"] {
            assert_eq!(counts[ce], 1, "{ce}");
        }
    }

    #[test]
    fn test_generator_stamps_created_at() {
        let generator =
            ExamGenerator::new(InMemoryCatalog::default(), FrameworkId::Es).with_created_at(true);
        let req = request(1.0, vec![question("q-1", QuestionIntent::Theoretical)]);

        let response = generator.generate(GenerateRequest::Full(req)).unwrap();
        let GenerateResponse::Exam { exam } = response else {
            panic!("expected an exam, got {response:?}");
        };
        assert!(exam.created_at.is_some());
    }

    #[test]
    fn test_generator_unknown_module() {
        let generator = ExamGenerator::new(InMemoryCatalog::seeded(), FrameworkId::Es);
        let request = GenerateRequest::FromModule(GenerateFromModuleRequest {
            exam_id: Some("exam-9".to_string()),
            name: "Missing".to_string(),
            module_id: "module-404".to_string(),
            difficulty: Difficulty::Easy,
            question_count: 1.0,
            distribution: None,
            coverage_weights: None,
            framework_id: None,
        });

        let err = generator.generate(request).unwrap_err();
        assert!(matches!(err, ExamgenError::ModuleNotFound(ref id) if id == "module-404"));
    }

    #[test]
    fn test_generator_reports_business_errors_in_response() {
        let generator = ExamGenerator::new(InMemoryCatalog::default(), FrameworkId::Es);
        let response = generator
            .generate(GenerateRequest::Full(request(0.0, vec![])))
            .unwrap();
        assert_eq!(
            response.errors(),
            ["questionCount must be an integer greater than 0.".to_string()]
        );
    }
}
