//! Relation kinds for a monitored account
//!
//! A monitored account owns exactly one snapshot per relation kind. The two
//! kinds map to separate store partitions and are never mixed.

use serde::{Deserialize, Serialize};

/// Direction of a follow relation relative to the monitored account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    /// Accounts that follow the monitored account (inbound).
    Followers,
    /// Accounts the monitored account follows (outbound).
    Followees,
}

impl RelationKind {
    /// All relation kinds, in the order runs process them.
    pub const ALL: [RelationKind; 2] = [RelationKind::Followers, RelationKind::Followees];

    /// Stable lowercase name, used as store table name and log field value.
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::Followers => "followers",
            RelationKind::Followees => "followees",
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
