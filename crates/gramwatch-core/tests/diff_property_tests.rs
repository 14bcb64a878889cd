//! Property-based tests for the set differencer.
//!
//! Verifies the diff algebra for arbitrary previous/current sets:
//! the partitions are disjoint and each side reconstructs the other.

use gramwatch_core::diff::{diff, not_following_back};
use gramwatch_core_types::Identity;
use proptest::prelude::*;
use std::collections::HashSet;

fn identity_set() -> impl Strategy<Value = HashSet<Identity>> {
    proptest::collection::hash_set("[a-z_.]{1,12}", 0..40)
        .prop_map(|names| names.into_iter().map(Identity::from).collect())
}

proptest! {
    #[test]
    fn prop_partitions_are_disjoint(previous in identity_set(), current in identity_set()) {
        let result = diff(&previous, &current);
        prop_assert!(result.added.is_disjoint(&result.removed));
    }

    #[test]
    fn prop_previous_minus_removed_plus_added_is_current(
        previous in identity_set(),
        current in identity_set(),
    ) {
        let result = diff(&previous, &current);
        let reconstructed: HashSet<Identity> = previous
            .difference(&result.removed)
            .cloned()
            .chain(result.added.iter().cloned())
            .collect();
        prop_assert_eq!(reconstructed, current);
    }

    #[test]
    fn prop_current_minus_added_plus_removed_is_previous(
        previous in identity_set(),
        current in identity_set(),
    ) {
        let result = diff(&previous, &current);
        let reconstructed: HashSet<Identity> = current
            .difference(&result.added)
            .cloned()
            .chain(result.removed.iter().cloned())
            .collect();
        prop_assert_eq!(reconstructed, previous);
    }

    #[test]
    fn prop_diff_against_self_is_empty(members in identity_set()) {
        prop_assert!(diff(&members, &members).is_empty());
    }

    #[test]
    fn prop_empty_previous_adds_everything(current in identity_set()) {
        let result = diff(&HashSet::new(), &current);
        prop_assert_eq!(result.added, current);
        prop_assert!(result.removed.is_empty());
    }

    #[test]
    fn prop_empty_current_removes_everything(previous in identity_set()) {
        let result = diff(&previous, &HashSet::new());
        prop_assert!(result.added.is_empty());
        prop_assert_eq!(result.removed, previous);
    }

    #[test]
    fn prop_not_following_back_is_subset_of_followees(
        followees in identity_set(),
        followers in identity_set(),
    ) {
        let result = not_following_back(&followees, &followers);
        prop_assert!(result.is_subset(&followees));
        prop_assert!(result.is_disjoint(&followers));
    }
}
