//! Weight normalization.
//!
//! Turns a set of sibling ids plus optional percentage overrides into a
//! complete percentage mapping over all ids that sums to 100.
//!
//! K_i: No overrides ⇒ equal split. Ids without an override share what is
//! left of 100 after the explicit ones.
//! B_i: Overrides may be out of scope, duplicated, negative, non-finite or
//! exceed 100 → error list, empty mapping.

use indexmap::IndexMap;

/// One explicit percentage for an id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightOverride<'a> {
    pub id: &'a str,
    pub percentage: f64,
}

impl<'a> WeightOverride<'a> {
    pub fn new(id: &'a str, percentage: f64) -> Self {
        Self { id, percentage }
    }
}

/// Percentage per id, in the order the ids were given.
pub type Percentages = IndexMap<String, f64>;

/// Normalize `overrides` over `ids` into percentages summing to 100.
///
/// `label` prefixes error messages (e.g. "Learning outcome"). An empty
/// override list behaves like no overrides at all.
pub fn normalize_weights(
    ids: &[&str],
    overrides: Option<&[WeightOverride<'_>]>,
    label: &str,
) -> Result<Percentages, Vec<String>> {
    let mut normalized = Percentages::with_capacity(ids.len());

    if ids.is_empty() {
        return Ok(normalized);
    }

    let overrides = match overrides {
        Some(overrides) if !overrides.is_empty() => overrides,
        _ => {
            let equal = 100.0 / ids.len() as f64;
            normalized.extend(ids.iter().map(|id| (id.to_string(), equal)));
            return Ok(normalized);
        }
    };

    let mut errors = Vec::new();
    let mut explicit: IndexMap<&str, f64> = IndexMap::with_capacity(overrides.len());

    for weight in overrides {
        if !ids.contains(&weight.id) {
            errors.push(format!("{label} '{}' is not in the current scope.", weight.id));
            continue;
        }

        if explicit.contains_key(weight.id) {
            errors.push(format!("{label} '{}' is duplicated in weights.", weight.id));
            continue;
        }

        if !weight.percentage.is_finite() || weight.percentage < 0.0 {
            errors.push(format!("{label} '{}' has an invalid percentage.", weight.id));
            continue;
        }

        explicit.insert(weight.id, weight.percentage);
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let explicit_total: f64 = explicit.values().sum();
    if explicit_total > 100.0 {
        return Err(vec![format!("{label} explicit percentages exceed 100.")]);
    }

    let missing = ids.iter().filter(|id| !explicit.contains_key(**id)).count();
    let equal_for_missing = if missing > 0 {
        (100.0 - explicit_total) / missing as f64
    } else {
        0.0
    };

    for id in ids {
        let pct = explicit.get(id).copied().unwrap_or(equal_for_missing);
        normalized.insert(id.to_string(), pct);
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn total(percentages: &Percentages) -> f64 {
        percentages.values().sum()
    }

    #[test]
    fn test_empty_ids() {
        let result = normalize_weights(&[], Some(&[WeightOverride::new("x", 50.0)]), "Learning outcome");
        assert!(result.unwrap().is_empty());
    }

    #[test]
    fn test_equal_split_without_overrides() {
        let normalized = normalize_weights(&["a", "b", "c"], None, "Learning outcome").unwrap();
        assert_eq!(normalized.len(), 3);
        for pct in normalized.values() {
            assert!((pct - 100.0 / 3.0).abs() < EPSILON);
        }
        assert!((total(&normalized) - 100.0).abs() < EPSILON);
    }

    #[test]
    fn test_empty_override_list_is_equal_split() {
        let normalized = normalize_weights(&["a", "b"], Some(&[]), "Learning outcome").unwrap();
        assert_eq!(normalized["a"], 50.0);
        assert_eq!(normalized["b"], 50.0);
    }

    #[test]
    fn test_partial_overrides_share_remainder() {
        let overrides = [WeightOverride::new("b", 40.0)];
        let normalized = normalize_weights(&["a", "b", "c"], Some(&overrides), "Learning outcome").unwrap();
        assert_eq!(normalized["a"], 30.0);
        assert_eq!(normalized["b"], 40.0);
        assert_eq!(normalized["c"], 30.0);
        let order: Vec<&str> = normalized.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_zero_override_is_not_absence() {
        let overrides = [WeightOverride::new("a", 0.0)];
        let normalized = normalize_weights(&["a", "b"], Some(&overrides), "Learning outcome").unwrap();
        assert_eq!(normalized["a"], 0.0);
        assert_eq!(normalized["b"], 100.0);
    }

    #[test]
    fn test_sums_to_hundred_for_various_inputs() {
        let ids = ["a", "b", "c", "d", "e", "f", "g"];
        for explicit in [0.0, 1.5, 33.3, 70.0, 99.99] {
            let overrides = [WeightOverride::new("c", explicit)];
            for n in 1..=ids.len() {
                let scope = &ids[..n];
                let overrides = if scope.contains(&"c") { Some(&overrides[..]) } else { None };
                let normalized = normalize_weights(scope, overrides, "Assessment criterion").unwrap();
                assert!((total(&normalized) - 100.0).abs() < 1e-6, "n={n} explicit={explicit}");
            }
        }
    }

    #[test]
    fn test_out_of_scope_duplicate_and_invalid_are_collected() {
        let overrides = [
            WeightOverride::new("x", 10.0),
            WeightOverride::new("a", 10.0),
            WeightOverride::new("a", 20.0),
            WeightOverride::new("b", -1.0),
            WeightOverride::new("c", f64::NAN),
        ];
        let errors = normalize_weights(&["a", "b", "c"], Some(&overrides), "Learning outcome").unwrap_err();
        assert_eq!(
            errors,
            vec![
                "Learning outcome 'x' is not in the current scope.",
                "Learning outcome 'a' is duplicated in weights.",
                "Learning outcome 'b' has an invalid percentage.",
                "Learning outcome 'c' has an invalid percentage.",
            ]
        );
    }

    #[test]
    fn test_infinite_percentage_is_invalid() {
        let overrides = [WeightOverride::new("a", f64::INFINITY)];
        let errors = normalize_weights(&["a"], Some(&overrides), "Assessment criterion").unwrap_err();
        assert_eq!(errors, vec!["Assessment criterion 'a' has an invalid percentage."]);
    }

    #[test]
    fn test_explicit_sum_above_hundred() {
        let overrides = [WeightOverride::new("a", 60.0), WeightOverride::new("b", 50.0)];
        let errors = normalize_weights(&["a", "b"], Some(&overrides), "Learning outcome").unwrap_err();
        assert_eq!(errors, vec!["Learning outcome explicit percentages exceed 100."]);
    }

    #[test]
    fn test_all_overridden_below_hundred_is_kept_as_is() {
        let overrides = [WeightOverride::new("a", 30.0), WeightOverride::new("b", 30.0)];
        let normalized = normalize_weights(&["a", "b"], Some(&overrides), "Learning outcome").unwrap();
        assert_eq!(normalized["a"], 30.0);
        assert_eq!(normalized["b"], 30.0);
    }
}
