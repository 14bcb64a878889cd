//! GramWatch Store - snapshot persistence over SQLite
//!
//! Provides:
//! - Connection management and pragmas
//! - Embedded, idempotent schema migrations
//! - `SqliteSnapshotStore`, the durable implementation of the core's
//!   `SnapshotStore` trait (one database per monitored account, one table
//!   per relation kind, transactional full-replace commits)

pub mod db;
pub mod errors;
pub mod migrations;
pub mod snapshot;

// Re-export key types
pub use errors::Result;
pub use snapshot::SqliteSnapshotStore;
