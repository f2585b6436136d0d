use std::collections::BTreeSet;

use super::error::ReconcileError;

/// Partition of the target chain set against the observed chain set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologySplit {
    /// Chains present in both target and observed.
    pub existing: BTreeSet<String>,
    /// Chains declared in the target but not yet deployed.
    pub extension: BTreeSet<String>,
}

/// Splits target chains into existing and extension sets.
///
/// Classification is purely by set membership; chain counts are never
/// compared, so a target of {A, C} against an observed {A, B} is caught as
/// an attempted unenrollment of B rather than misclassified.
///
/// Removing an enrolled chain is unsupported: any observed chain missing
/// from the target fails fast before any chain is touched.
pub fn split_topology(
    target: &BTreeSet<String>,
    observed: &BTreeSet<String>,
) -> Result<TopologySplit, ReconcileError> {
    let removed: Vec<&String> = observed.difference(target).collect();
    if !removed.is_empty() {
        let listed = removed
            .iter()
            .map(|chain| chain.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(ReconcileError::UnsupportedOperation(format!(
            "target config removes enrolled chain(s) [{listed}]; \
             unenrolling chains from a warp route is not supported"
        )));
    }

    let existing: BTreeSet<String> = target.intersection(observed).cloned().collect();
    let extension: BTreeSet<String> = target.difference(observed).cloned().collect();
    Ok(TopologySplit {
        existing,
        extension,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(chains: &[&str]) -> BTreeSet<String> {
        chains.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn extension_is_exact_set_difference() {
        let split = split_topology(&set(&["a", "b", "c"]), &set(&["a"])).unwrap();
        assert_eq!(split.existing, set(&["a"]));
        assert_eq!(split.extension, set(&["b", "c"]));
    }

    #[test]
    fn identical_sets_yield_empty_extension() {
        let split = split_topology(&set(&["a", "b"]), &set(&["a", "b"])).unwrap();
        assert_eq!(split.existing, set(&["a", "b"]));
        assert!(split.extension.is_empty());
    }

    #[test]
    fn strict_subset_target_is_refused() {
        let err = split_topology(&set(&["a"]), &set(&["a", "b"])).unwrap_err();
        assert!(matches!(err, ReconcileError::UnsupportedOperation(_)));
    }

    #[test]
    fn equal_counts_with_different_sets_are_refused() {
        // {a, c} vs {a, b}: same cardinality, but b would be unenrolled.
        let err = split_topology(&set(&["a", "c"]), &set(&["a", "b"])).unwrap_err();
        assert!(matches!(err, ReconcileError::UnsupportedOperation(_)));
    }

    #[test]
    fn fresh_route_is_all_extension() {
        let split = split_topology(&set(&["a", "b"]), &set(&[])).unwrap();
        assert!(split.existing.is_empty());
        assert_eq!(split.extension, set(&["a", "b"]));
    }
}
