//! Notification categories, message composition, and the sink capability.
//!
//! The sink is best-effort by contract: the orchestrator logs and swallows
//! send failures so one broken delivery never blocks the next category or
//! the commit phase.

use crate::errors::Result;
use gramwatch_core_types::Identity;
use std::collections::HashSet;

/// A detected change category worth telling a human about.
///
/// `ALL` fixes the order categories are reported in within one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Followers present in the previous snapshot but gone now
    LostFollowers,
    /// Followers present now but not in the previous snapshot
    NewFollowers,
    /// Followees the account stopped following
    Unfollowed,
    /// Followees the account started following
    NewFollowees,
    /// Current followees who do not currently follow back
    NotFollowingBack,
}

impl Category {
    /// Reporting order within a run.
    pub const ALL: [Category; 5] = [
        Category::LostFollowers,
        Category::NewFollowers,
        Category::Unfollowed,
        Category::NewFollowees,
        Category::NotFollowingBack,
    ];

    /// Leading emoji for the composed message.
    pub fn emoji(&self) -> &'static str {
        match self {
            Category::LostFollowers => "\u{1F6A8}",    // 🚨
            Category::NewFollowers => "\u{1F389}",     // 🎉
            Category::Unfollowed => "\u{1F6AB}",       // 🚫
            Category::NewFollowees => "\u{2795}",      // ➕
            Category::NotFollowingBack => "\u{2139}\u{FE0F}", // ℹ️
        }
    }

    /// Verb phrase following the account identity in the composed message.
    pub fn verb_phrase(&self) -> &'static str {
        match self {
            Category::LostFollowers => "has lost followers",
            Category::NewFollowers => "has new followers",
            Category::Unfollowed => "has unfollowed accounts",
            Category::NewFollowees => "has started following",
            Category::NotFollowingBack => "follows who do not follow back",
        }
    }

    /// Stable lowercase name for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::LostFollowers => "lost_followers",
            Category::NewFollowers => "new_followers",
            Category::Unfollowed => "unfollowed",
            Category::NewFollowees => "new_followees",
            Category::NotFollowingBack => "not_following_back",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compose the human-readable message for one category.
///
/// Format: `<emoji> <account> <verb>:\n` followed by one member per line.
/// Member line order follows set iteration order and is deliberately
/// unspecified; consumers comparing messages must treat the body as a set.
pub fn compose_message(
    category: Category,
    account: &Identity,
    members: &HashSet<Identity>,
) -> String {
    let mut message = format!(
        "{} {} {}:\n",
        category.emoji(),
        account,
        category.verb_phrase()
    );
    let lines: Vec<&str> = members.iter().map(Identity::as_str).collect();
    message.push_str(&lines.join("\n"));
    message
}

/// External notification delivery capability, best-effort.
///
/// One sink instance per run, already configured with its destination and
/// credential. Implementations return `NotifySend` errors; they never
/// panic on delivery failure.
pub trait NotifySink {
    /// Deliver one composed message.
    fn send(&self, message: &str) -> Result<()>;
}

/// Sink for the disabled configuration. The orchestrator never invokes a
/// sink when notifications are off, so this exists for wiring symmetry and
/// for tests that want an always-succeeding sink.
#[derive(Debug, Default)]
pub struct NoopSink;

impl NotifySink for NoopSink {
    fn send(&self, _message: &str) -> Result<()> {
        Ok(())
    }
}
