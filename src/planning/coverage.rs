//! Coverage planning: per-criterion question targets from curriculum weights.
//!
//! Pipeline:
//! Criteria grouped by outcome → outcome weights normalized → criterion
//! weights normalized within each outcome → global percentage per
//! criterion → largest-remainder allocation of the question count.
//!
//! Each phase collects all of its errors and stops the plan before the next
//! phase runs.

use super::{Percentages, Targets, WeightOverride, allocate_largest_remainder, normalize_weights};
use crate::models::{
    AssessmentCriterion, AssessmentCriterionWeight, CoverageWeights, LearningOutcome,
};
use indexmap::IndexMap;
use tracing::debug;

const LEARNING_OUTCOME_LABEL: &str = "Learning outcome";
const ASSESSMENT_CRITERION_LABEL: &str = "Assessment criterion";

/// Build the target question count of every assessment criterion.
///
/// Targets are keyed by criterion id, ordered by outcome (input order) and
/// then by criterion (input order). They sum to `question_count`.
pub fn plan_coverage(
    question_count: usize,
    learning_outcomes: &[LearningOutcome],
    assessment_criteria: &[AssessmentCriterion],
    coverage_weights: Option<&CoverageWeights>,
) -> Result<Targets, Vec<String>> {
    let lo_ids: Vec<&str> = learning_outcomes.iter().map(|lo| lo.id.as_str()).collect();
    let criteria_by_outcome = group_criteria(&lo_ids, assessment_criteria)?;

    let ce_weights = coverage_weights
        .and_then(|w| w.assessment_criterion_weights.as_deref())
        .unwrap_or_default();
    check_criterion_weights(&criteria_by_outcome, ce_weights)?;

    let lo_overrides: Option<Vec<WeightOverride<'_>>> = coverage_weights
        .and_then(|w| w.learning_outcome_weights.as_ref())
        .map(|weights| {
            weights
                .iter()
                .map(|w| WeightOverride::new(&w.learning_outcome_id, w.percentage))
                .collect()
        });
    let lo_pct = normalize_weights(&lo_ids, lo_overrides.as_deref(), LEARNING_OUTCOME_LABEL)?;

    let mut errors = Vec::new();
    let mut global_pct = Percentages::new();

    for (lo_id, ce_ids) in &criteria_by_outcome {
        if ce_ids.is_empty() {
            continue;
        }

        // Only weights that declare this outcome as their parent apply here
        let ce_overrides: Option<Vec<WeightOverride<'_>>> = coverage_weights
            .and_then(|w| w.assessment_criterion_weights.as_ref())
            .map(|weights| {
                weights
                    .iter()
                    .filter(|w| w.learning_outcome_id == *lo_id)
                    .map(|w| {
                        WeightOverride::new(
                            &w.assessment_criterion_id,
                            w.percentage_within_learning_outcome,
                        )
                    })
                    .collect()
            });

        let ce_pct = match normalize_weights(ce_ids, ce_overrides.as_deref(), ASSESSMENT_CRITERION_LABEL) {
            Ok(ce_pct) => ce_pct,
            Err(ce_errors) => {
                errors.extend(ce_errors);
                continue;
            }
        };

        let outcome_pct = lo_pct.get(*lo_id).copied().unwrap_or(0.0);
        for (ce_id, within_pct) in ce_pct {
            global_pct.insert(ce_id, outcome_pct * within_pct / 100.0);
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    debug!(
        question_count,
        criteria = global_pct.len(),
        "Allocating coverage targets"
    );

    Ok(allocate_largest_remainder(question_count, &global_pct))
}

/// Group criterion ids under their learning outcome, keeping outcome order.
fn group_criteria<'a>(
    lo_ids: &[&'a str],
    assessment_criteria: &'a [AssessmentCriterion],
) -> Result<IndexMap<&'a str, Vec<&'a str>>, Vec<String>> {
    let mut grouped: IndexMap<&str, Vec<&str>> =
        lo_ids.iter().map(|id| (*id, Vec::new())).collect();
    let mut errors = Vec::new();

    for ce in assessment_criteria {
        match grouped.get_mut(ce.learning_outcome_id.as_str()) {
            Some(children) => children.push(&ce.id),
            None => errors.push(format!(
                "Assessment criterion '{}' references unknown learning outcome '{}'.",
                ce.id, ce.learning_outcome_id
            )),
        }
    }

    if errors.is_empty() {
        Ok(grouped)
    } else {
        Err(errors)
    }
}

/// Explicit criterion weights must name a known criterion and its real parent.
fn check_criterion_weights(
    criteria_by_outcome: &IndexMap<&str, Vec<&str>>,
    weights: &[AssessmentCriterionWeight],
) -> Result<(), Vec<String>> {
    let parent_of: IndexMap<&str, &str> = criteria_by_outcome
        .iter()
        .flat_map(|(lo_id, ce_ids)| ce_ids.iter().map(move |ce_id| (*ce_id, *lo_id)))
        .collect();

    let mut errors = Vec::new();
    for weight in weights {
        let ce_id = weight.assessment_criterion_id.as_str();
        match parent_of.get(ce_id) {
            None => errors.push(format!(
                "Assessment criterion weight '{ce_id}' does not exist in assessmentCriteria."
            )),
            Some(parent) if *parent != weight.learning_outcome_id => errors.push(format!(
                "Assessment criterion '{ce_id}' belongs to '{parent}', not '{}'.",
                weight.learning_outcome_id
            )),
            Some(_) => {}
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
