//! Structural and distribution checks of an assembled exam.
//!
//! K_i: An empty exam short-circuits; every other finding accumulates.
//! K_i: Messages are ordered: per-question findings in question order,
//! then distribution findings.

use crate::models::{DistributionByCount, Exam, Question, QuestionIntent, QuestionKind};
use std::collections::HashSet;

/// Check one question on its own.
pub fn validate_question(question: &Question) -> Vec<String> {
    let mut errors = Vec::new();

    if question.ce_ids.is_empty() {
        errors.push(format!(
            "Question {} must reference at least one CE.",
            question.id
        ));
    }

    if let QuestionKind::MultipleChoice { options } = &question.kind {
        if options.len() < 2 {
            errors.push(format!(
                "Multiple choice question {} must have at least 2 options.",
                question.id
            ));
        }

        let correct = options.iter().filter(|o| o.is_correct).count();
        if correct != 1 {
            errors.push(format!(
                "Multiple choice question {} must have exactly one correct option.",
                question.id
            ));
        }
    }

    errors
}

/// Check an exam: structure first, then the declared distribution if any.
///
/// Returns every finding; an empty list means the exam is valid.
pub fn validate_exam(exam: &Exam) -> Vec<String> {
    if exam.questions.is_empty() {
        return vec!["Exam must contain at least 1 question.".to_string()];
    }

    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::with_capacity(exam.questions.len());

    for question in &exam.questions {
        errors.extend(validate_question(question));

        if !seen.insert(question.id.as_str()) {
            errors.push(format!(
                "Question ID '{}' is duplicated within the exam.",
                question.id
            ));
        }
    }

    if let Some(by_count) = exam.by_count() {
        errors.extend(validate_distribution(exam, by_count));
    }

    errors
}

fn in_percentage_range(value: f64) -> bool {
    value.is_finite() && (0.0..=100.0).contains(&value)
}

/// Check the declared split itself and the split the questions realize.
fn validate_distribution(exam: &Exam, by_count: &DistributionByCount) -> Vec<String> {
    let mut errors = Vec::new();
    let tolerance = by_count.tolerance_or_default();

    let declared = [
        ("theoreticalPct", by_count.theoretical_pct),
        ("practicalPct", by_count.practical_pct),
        ("tolerancePct", tolerance),
    ];
    for (field, value) in declared {
        if !in_percentage_range(value) {
            errors.push(format!(
                "distribution.byCount.{field} must be between 0 and 100."
            ));
        }
    }

    if by_count.theoretical_pct + by_count.practical_pct != 100.0 {
        errors.push("distribution.byCount percentages must add up to 100.".to_string());
    }

    let total = exam.questions.len() as f64;
    for (intent, label) in [
        (QuestionIntent::Theoretical, "Theoretical"),
        (QuestionIntent::Practical, "Practical"),
    ] {
        let actual = exam.count_intent(intent) as f64 / total * 100.0;
        if (actual - by_count.target_for(intent)).abs() > tolerance {
            errors.push(format!(
                "{label} questions percentage ({actual:.2}%) is outside allowed tolerance."
            ));
        }
    }

    errors
}
