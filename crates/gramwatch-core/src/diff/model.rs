//! Diff output types.

use gramwatch_core_types::Identity;
use std::collections::HashSet;

/// The immutable result of diffing one relation's previous snapshot against
/// its freshly fetched current set.
///
/// Unchanged members are implicit and never materialized; only changes
/// matter downstream. The two partitions are disjoint by construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RelationDiff {
    /// Identities in the current set but not the previous snapshot
    pub added: HashSet<Identity>,
    /// Identities in the previous snapshot but not the current set
    pub removed: HashSet<Identity>,
}

impl RelationDiff {
    /// True when nothing changed between the two snapshots.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(RelationDiff::default().is_empty());
    }

    #[test]
    fn test_nonempty_when_either_partition_populated() {
        let mut diff = RelationDiff::default();
        diff.removed.insert(Identity::from("bob"));
        assert!(!diff.is_empty());
    }
}
