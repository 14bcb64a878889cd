//! Membership diff computation.
//!
//! The core entry point is [`engine::diff`], a pure function that classifies
//! every identity from two snapshots into added/removed partitions, plus
//! [`engine::not_following_back`] for the derived cross-relation partition.

pub mod engine;
pub mod model;

pub use engine::{diff, not_following_back};
pub use model::RelationDiff;
