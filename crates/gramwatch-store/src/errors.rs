//! Error handling for gramwatch-store
//!
//! Wraps gramwatch-core MonError with store-specific helpers

use gramwatch_core::{MonError, MonErrorKind};

/// Result type alias using MonError
pub type Result<T> = std::result::Result<T, MonError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> MonError {
    MonError::new(MonErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> MonError {
    MonError::new(MonErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> MonError {
    MonError::new(MonErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
