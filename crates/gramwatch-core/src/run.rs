//! Run orchestrator.
//!
//! Sequences one batch monitoring run through the state machine
//!
//! ```text
//! Start → Authenticated → ProfileResolved → Fetched → Diffed
//!       → Notified → Committed → Done
//! ```
//!
//! with `Failed` terminal from any state. Collaborators (platform session,
//! snapshot store, notifier sink) are traits so the machine itself stays
//! pure of I/O concerns and is testable with in-memory doubles.
//!
//! Error policy per state:
//! - config/auth/profile/fetch failures abort with the store untouched and
//!   no notifications sent;
//! - notification failures are logged and swallowed, isolated per category;
//! - commit failures abort, and a follower commit may land while the
//!   followee commit fails. That partial commit is named in the error and
//!   surfaced to the operator, never masked.

use crate::config::MonitorConfig;
use crate::diff::{diff, not_following_back, RelationDiff};
use crate::errors::{MonError, MonErrorKind, Result};
use crate::notify::{compose_message, Category, NotifySink};
use chrono::{DateTime, Utc};
use gramwatch_core_types::{Identity, RelationKind, Sensitive};
use std::collections::HashSet;

/// States of one monitoring run, in transition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Start,
    Authenticated,
    ProfileResolved,
    Fetched,
    Diffed,
    Notified,
    Committed,
    Done,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Start => "start",
            RunState::Authenticated => "authenticated",
            RunState::ProfileResolved => "profile_resolved",
            RunState::Fetched => "fetched",
            RunState::Diffed => "diffed",
            RunState::Notified => "notified",
            RunState::Committed => "committed",
            RunState::Done => "done",
        }
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fetched profile: produces the two current membership sets.
///
/// Pagination is the collaborator's concern; each fetch materializes the
/// full finite sequence into a set before the orchestrator looks at it.
pub trait ProfileHandle {
    /// Retrieve the complete current follower set.
    fn fetch_followers(&mut self) -> Result<HashSet<Identity>>;

    /// Retrieve the complete current followee set.
    fn fetch_followees(&mut self) -> Result<HashSet<Identity>>;
}

/// Capability to query the target platform.
pub trait PlatformSession {
    type Profile: ProfileHandle;

    /// Acquire the capability. `BadCredentials` and `Auth` are the only
    /// expected failure kinds.
    fn login(&mut self, username: &str, password: &Sensitive<String>) -> Result<()>;

    /// Resolve the monitored account to a queryable handle.
    /// Fails with `ProfileNotFound` or a transport-flavored `Auth` error.
    fn resolve_profile(&mut self, target: &Identity) -> Result<Self::Profile>;
}

/// Persistence for one monitored account's snapshots, one partition per
/// relation kind.
pub trait SnapshotStore {
    /// The persisted set, or the empty set when the account has never run.
    fn load(&mut self, kind: RelationKind) -> Result<HashSet<Identity>>;

    /// Atomically discard the old set and commit `current` with a uniform
    /// last-seen timestamp. A crash mid-replace must leave either the fully
    /// old or fully new set, never a mixture.
    fn replace(
        &mut self,
        kind: RelationKind,
        current: &HashSet<Identity>,
        as_of: DateTime<Utc>,
    ) -> Result<()>;
}

/// Summary of a completed run, for the CLI to render.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub followers_fetched: usize,
    pub followees_fetched: usize,
    pub followers: RelationDiff,
    pub followees: RelationDiff,
    pub not_following_back: HashSet<Identity>,
    /// Notifications delivered / failed (failures were swallowed)
    pub messages_sent: usize,
    pub messages_failed: usize,
}

impl RunReport {
    /// True when neither relation changed since the previous run.
    pub fn unchanged(&self) -> bool {
        self.followers.is_empty() && self.followees.is_empty()
    }
}

/// Sequences fetch → load-previous → diff → notify → store for both
/// relation kinds of one monitored account.
pub struct Orchestrator<S, T, N> {
    session: S,
    store: T,
    sink: N,
}

impl<S, T, N> Orchestrator<S, T, N>
where
    S: PlatformSession,
    T: SnapshotStore,
    N: NotifySink,
{
    pub fn new(session: S, store: T, sink: N) -> Self {
        Self {
            session,
            store,
            sink,
        }
    }

    /// Execute one run to completion.
    ///
    /// # Errors
    ///
    /// Any fatal `MonError` from a collaborator ends the run in the
    /// `Failed` terminal state; the error carries the failing operation.
    /// `NotifySend` errors never surface here.
    pub fn run(mut self, config: &MonitorConfig) -> Result<RunReport> {
        let account = &config.target_account;
        transition(RunState::Start, account);

        config.validate()?;

        self.session
            .login(&config.platform_username, &config.platform_password)?;
        transition(RunState::Authenticated, account);

        let mut profile = self.session.resolve_profile(account)?;
        transition(RunState::ProfileResolved, account);

        // Fetch both current sets in full before any store access; a
        // transient fetch failure must leave the last-known-good baseline
        // intact and can never produce a false "lost everyone" diff.
        let current_followers = profile.fetch_followers()?;
        let current_followees = profile.fetch_followees()?;
        transition(RunState::Fetched, account);
        tracing::info!(
            account = %account,
            follower_count = current_followers.len(),
            followee_count = current_followees.len(),
            "fetched current membership"
        );

        let previous_followers = self.store.load(RelationKind::Followers)?;
        let previous_followees = self.store.load(RelationKind::Followees)?;

        let followers = diff(&previous_followers, &current_followers);
        let followees = diff(&previous_followees, &current_followees);
        let nfb = not_following_back(&current_followees, &current_followers);
        transition(RunState::Diffed, account);

        let partitions: [(Category, &HashSet<Identity>); 5] = [
            (Category::LostFollowers, &followers.removed),
            (Category::NewFollowers, &followers.added),
            (Category::Unfollowed, &followees.removed),
            (Category::NewFollowees, &followees.added),
            (Category::NotFollowingBack, &nfb),
        ];

        let mut messages_sent = 0;
        let mut messages_failed = 0;
        for (category, members) in partitions {
            if members.is_empty() {
                continue;
            }
            // Detection is always logged, whether or not the sink is used.
            tracing::info!(
                account = %account,
                category = %category,
                member_count = members.len(),
                members = ?members,
                "detected change category"
            );
            if !config.notifications_enabled {
                continue;
            }
            let message = compose_message(category, account, members);
            match self.sink.send(&message) {
                Ok(()) => {
                    messages_sent += 1;
                    tracing::info!(account = %account, category = %category, "notification sent");
                }
                Err(err) => {
                    // Best-effort side channel: log and move on to the next
                    // category and the commit phase.
                    messages_failed += 1;
                    tracing::error!(
                        account = %account,
                        category = %category,
                        error = %err,
                        "notification send failed"
                    );
                }
            }
        }
        transition(RunState::Notified, account);

        // One capture timestamp shared by both relation commits.
        let as_of = Utc::now();
        self.store
            .replace(RelationKind::Followers, &current_followers, as_of)
            .map_err(|err| {
                MonError::new(MonErrorKind::Persistence)
                    .with_op("commit_followers")
                    .with_account(account.as_str())
                    .with_message("follower snapshot commit failed; no snapshot was committed")
                    .with_source(err)
            })?;
        self.store
            .replace(RelationKind::Followees, &current_followees, as_of)
            .map_err(|err| {
                // Known limitation: the two relation kinds commit in
                // separate transactions, so the follower commit has already
                // landed at this point. Name that in the error instead of
                // hiding it.
                MonError::new(MonErrorKind::Persistence)
                    .with_op("commit_followees")
                    .with_account(account.as_str())
                    .with_message(
                        "followee snapshot commit failed; follower snapshot was already committed",
                    )
                    .with_source(err)
            })?;
        transition(RunState::Committed, account);

        let report = RunReport {
            followers_fetched: current_followers.len(),
            followees_fetched: current_followees.len(),
            followers,
            followees,
            not_following_back: nfb,
            messages_sent,
            messages_failed,
        };
        tracing::info!(
            account = %account,
            followers_added = report.followers.added.len(),
            followers_removed = report.followers.removed.len(),
            followees_added = report.followees.added.len(),
            followees_removed = report.followees.removed.len(),
            not_following_back = report.not_following_back.len(),
            messages_sent = report.messages_sent,
            messages_failed = report.messages_failed,
            "run complete"
        );
        transition(RunState::Done, account);
        Ok(report)
    }
}

fn transition(state: RunState, account: &Identity) {
    tracing::info!(account = %account, state = %state, "state transition");
}
