//! Set differencer.
//!
//! Pure, total set arithmetic over identity sets. No side effects, no
//! failure modes; the orchestrator's `Fetched → Diffed` transition cannot
//! fail because everything here is plain hash-set subtraction,
//! O(|previous| + |current|).

use crate::diff::model::RelationDiff;
use gramwatch_core_types::Identity;
use std::collections::HashSet;

/// Classify membership changes between two snapshots of one relation.
///
/// `removed = previous − current`, `added = current − previous`.
///
/// An empty `previous` is the first-run case: every current member is
/// classified added, by design. An empty `current` classifies every
/// previous member as removed; a fetch that legitimately returned nothing
/// is a total-loss diff, never silently "no change".
pub fn diff(previous: &HashSet<Identity>, current: &HashSet<Identity>) -> RelationDiff {
    RelationDiff {
        added: current.difference(previous).cloned().collect(),
        removed: previous.difference(current).cloned().collect(),
    }
}

/// Derived cross-relation partition: followees the account follows who do
/// not follow back, `followees − followers`.
///
/// Computed from the two *current* sets of the same run, never against
/// history.
pub fn not_following_back(
    followees: &HashSet<Identity>,
    followers: &HashSet<Identity>,
) -> HashSet<Identity> {
    followees.difference(followers).cloned().collect()
}
