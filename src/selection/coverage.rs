//! Coverage mode: greedy selection against per-criterion deficits.
//!
//! K_i: A single greedy pass, no backtracking. Ties go to the first
//! candidate in pool order, so output is deterministic.
//! B_i: The pool may run dry or leave deficits unmet → error list.

use crate::models::Question;
use crate::planning::Targets;
use std::collections::HashSet;
use tracing::debug;

/// Outcome of a coverage-mode selection.
///
/// `selected` is empty whenever the requested count could not be reached.
/// When it was reached but some criteria are still short, `selected` holds
/// the full selection and `errors` holds the shortfall message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageSelection {
    pub selected: Vec<Question>,
    pub errors: Vec<String>,
}

impl CoverageSelection {
    /// Collapse into the fail-closed form used by generation: any error
    /// discards the selection.
    pub fn into_result(self) -> Result<Vec<Question>, Vec<String>> {
        if self.errors.is_empty() {
            Ok(self.selected)
        } else {
            Err(self.errors)
        }
    }
}

/// Greedily pick `question_count` questions that pay down `targets`.
pub fn select_by_coverage(
    question_count: usize,
    available: &[Question],
    targets: &Targets,
) -> CoverageSelection {
    let mut remaining: Vec<&Question> = available.iter().collect();
    let mut deficits = targets.clone();
    let mut selected: Vec<Question> = Vec::with_capacity(question_count);

    while selected.len() < question_count && !remaining.is_empty() {
        let pick = best_by_deficit(&remaining, &deficits)
            .unwrap_or_else(|| closest_to_targets(&remaining, targets));
        let question = remaining.remove(pick);

        let unique_ce_ids: HashSet<&str> = question.ce_ids.iter().map(String::as_str).collect();
        for ce_id in unique_ce_ids {
            if let Some(deficit) = deficits.get_mut(ce_id) {
                *deficit = deficit.saturating_sub(1);
            }
        }

        selected.push(question.clone());
    }

    if selected.len() < question_count {
        debug!(
            requested = question_count,
            selected = selected.len(),
            "Candidate pool exhausted"
        );
        return CoverageSelection {
            selected: Vec::new(),
            errors: vec!["Not enough available questions to satisfy questionCount.".to_string()],
        };
    }

    let unmet: Vec<String> = deficits
        .iter()
        .filter(|(_, short)| **short > 0)
        .map(|(ce_id, short)| format!("{ce_id} ({short} short)"))
        .collect();

    let errors = if unmet.is_empty() {
        Vec::new()
    } else {
        vec![format!(
            "Coverage targets could not be fully satisfied: {}.",
            unmet.join(", ")
        )]
    };

    CoverageSelection { selected, errors }
}

/// Index of the candidate whose open criteria carry the largest summed
/// deficit. Candidates touching no open criterion are not eligible.
fn best_by_deficit(remaining: &[&Question], deficits: &Targets) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;

    for (idx, question) in remaining.iter().enumerate() {
        let open: Vec<usize> = question
            .ce_ids
            .iter()
            .filter_map(|ce_id| deficits.get(ce_id).copied())
            .filter(|deficit| *deficit > 0)
            .collect();
        if open.is_empty() {
            continue;
        }

        let score: usize = open.iter().sum();
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((idx, score));
        }
    }

    best.map(|(idx, _)| idx)
}

/// Fallback once no deficit can be paid down: prefer candidates tagged with
/// any targeted criterion, then higher point values.
fn closest_to_targets(remaining: &[&Question], targets: &Targets) -> usize {
    let mut closest_idx = 0;
    let mut closest_score = -1.0;

    for (idx, question) in remaining.iter().enumerate() {
        let overlap = question
            .ce_ids
            .iter()
            .filter(|ce_id| targets.contains_key(ce_id.as_str()))
            .count();
        let score = if overlap > 0 {
            overlap as f64
        } else {
            question.points_or_default() * 0.001
        };

        if score > closest_score {
            closest_score = score;
            closest_idx = idx;
        }
    }

    closest_idx
}
