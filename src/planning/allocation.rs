//! Largest-remainder apportionment of an integer total.

use super::Percentages;
use indexmap::IndexMap;

/// Integer target per id, in the order of the input percentages.
pub type Targets = IndexMap<String, usize>;

/// Split `total` across `percentages` so that the parts sum to `total`.
///
/// Every id gets `floor(total * pct / 100)`. The units still missing go,
/// one each, to the ids with the largest fractional remainders; when more
/// units are missing than there are ids the assignment wraps around.
/// Equal remainders keep input order.
pub fn allocate_largest_remainder(total: usize, percentages: &Percentages) -> Targets {
    let mut targets = Targets::with_capacity(percentages.len());
    let mut remainders: Vec<(&str, f64)> = Vec::with_capacity(percentages.len());
    let mut allocated = 0usize;

    for (id, pct) in percentages {
        let raw = total as f64 * pct / 100.0;
        let base = raw.floor().max(0.0);
        // `base` is a non-negative whole number no larger than `total` here
        let base_units = base as usize;
        targets.insert(id.clone(), base_units);
        allocated += base_units;
        remainders.push((id.as_str(), raw - base));
    }

    // Stable sort: ties keep insertion order
    remainders.sort_by(|a, b| b.1.total_cmp(&a.1));

    let missing = total.saturating_sub(allocated);
    for (id, _) in remainders.iter().cycle().take(missing) {
        if let Some(target) = targets.get_mut(*id) {
            *target += 1;
        }
    }

    targets
}
