//! Distribution mode: theoretical/practical split by a single percentage.

use crate::models::{DistributionByCount, Question, QuestionIntent};
use tracing::debug;

/// Sub-counts for both sides of a split. Always sums to the requested count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntentTargets {
    pub theoretical: i64,
    pub practical: i64,
}

impl IntentTargets {
    /// `theoretical = round(count * pct / 100)`, practical takes the rest.
    pub fn split(question_count: i64, theoretical_pct: f64) -> Self {
        let theoretical = (question_count as f64 * theoretical_pct / 100.0).round() as i64;
        Self {
            theoretical,
            practical: question_count - theoretical,
        }
    }

    pub fn get(&self, intent: QuestionIntent) -> i64 {
        match intent {
            QuestionIntent::Theoretical => self.theoretical,
            QuestionIntent::Practical => self.practical,
        }
    }
}

/// Pick the first theoretical and then the first practical candidates.
///
/// Every shortfall is reported, not only the first one. Candidate order is
/// kept within each side.
pub fn select_by_distribution(
    question_count: i64,
    available: &[Question],
    distribution: &DistributionByCount,
) -> Result<Vec<Question>, Vec<String>> {
    let targets = IntentTargets::split(question_count, distribution.theoretical_pct);
    let pool = |intent: QuestionIntent| available.iter().filter(move |q| q.intent == intent);

    let mut errors = Vec::new();
    for intent in [QuestionIntent::Theoretical, QuestionIntent::Practical] {
        let required = targets.get(intent);
        let found = pool(intent).count();
        if (found as i64) < required {
            errors.push(format!(
                "Not enough {} questions. Required {required}, found {found}.",
                intent.as_str()
            ));
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    debug!(
        theoretical = targets.theoretical,
        practical = targets.practical,
        "Selecting by distribution"
    );

    let take = |n: i64| usize::try_from(n).unwrap_or(0);
    Ok(pool(QuestionIntent::Theoretical)
        .take(take(targets.theoretical))
        .chain(pool(QuestionIntent::Practical).take(take(targets.practical)))
        .cloned()
        .collect())
}
