//! Property tests for detector selection.

#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;

use proptest::prelude::*;

use faultline_analysis::detectors::select;
use faultline_analysis::{BugSink, DetectorRegistry, MemoryBugSink, SelectionSpec};

use common::{noop_factory, registry_of};

/// A registry of `flags.len()` detectors named `D0..Dn`.
fn registry(flags: &[bool]) -> DetectorRegistry {
    registry_of(
        flags
            .iter()
            .enumerate()
            .map(|(i, &enabled)| noop_factory(&format!("D{i}"), enabled))
            .collect(),
    )
}

fn sink() -> Arc<dyn BugSink> {
    Arc::new(MemoryBugSink::new())
}

proptest! {
    #[test]
    fn default_selection_is_exactly_the_enabled_factories(
        flags in prop::collection::vec(any::<bool>(), 0..12)
    ) {
        let registry = registry(&flags);
        let active = select(&registry, &SelectionSpec::AllEnabled, &sink()).unwrap();

        let expected: Vec<String> = flags
            .iter()
            .enumerate()
            .filter(|(_, enabled)| **enabled)
            .map(|(i, _)| format!("D{i}"))
            .collect();
        prop_assert_eq!(active.names(), expected);
    }

    #[test]
    fn inclusion_size_and_order_match_the_list(
        flags in prop::collection::vec(any::<bool>(), 1..12),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..16)
    ) {
        let registry = registry(&flags);
        let list: Vec<String> = picks
            .iter()
            .map(|ix| format!("D{}", ix.index(flags.len())))
            .collect();

        let active = select(&registry, &SelectionSpec::Include(list.clone()), &sink()).unwrap();
        prop_assert_eq!(active.len(), list.len());
        prop_assert_eq!(active.names(), list);
    }

    #[test]
    fn exclusion_size_is_total_minus_list_or_fails(
        flags in prop::collection::vec(any::<bool>(), 1..12),
        omitted in prop::collection::vec(0usize..16, 0..8)
    ) {
        let registry = registry(&flags);
        let list: Vec<String> = omitted.iter().map(|i| format!("D{i}")).collect();

        match select(&registry, &SelectionSpec::Exclude(list.clone()), &sink()) {
            Ok(active) => {
                prop_assert_eq!(active.len(), registry.len() - list.len());
                for name in active.names() {
                    prop_assert!(!list.contains(&name));
                }
            }
            Err(_) => {
                let mut unique = list.clone();
                unique.sort();
                unique.dedup();
                let has_duplicate = unique.len() != list.len();
                let has_unknown = omitted.iter().any(|&i| i >= flags.len());
                prop_assert!(has_duplicate || has_unknown);
            }
        }
    }

    #[test]
    fn exclusion_with_unknown_name_never_succeeds(
        flags in prop::collection::vec(any::<bool>(), 0..12)
    ) {
        let registry = registry(&flags);
        let list = vec![format!("D{}", flags.len())];
        prop_assert!(select(&registry, &SelectionSpec::Exclude(list), &sink()).is_err());
    }
}
