//! GramWatch Core - snapshot / diff / notify / commit state machine
//!
//! This crate provides the algorithmic heart of the monitor:
//! - Pure membership diffing with the derived not-following-back partition
//! - Notification categories and exact message composition
//! - The run orchestrator state machine over collaborator traits
//! - Canonical structured errors and the logging facility
//! - Explicit run configuration (no ambient lookups inside core logic)
//!
//! External I/O (the platform, the store, the sink) lives behind traits;
//! see `gramwatch-store`, `gramwatch-instagram`, `gramwatch-telegram`.

pub mod config;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod notify;
pub mod run;

// Re-export commonly used types
pub use config::{MonitorConfig, TelegramConfig};
pub use diff::{diff, not_following_back, RelationDiff};
pub use errors::{MonError, MonErrorKind, Result};
pub use notify::{compose_message, Category, NoopSink, NotifySink};
pub use run::{Orchestrator, PlatformSession, ProfileHandle, RunReport, RunState, SnapshotStore};
