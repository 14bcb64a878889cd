//! Database connection management
//!
//! Provides utilities for opening and configuring SQLite connections

use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;
use std::path::Path;

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Configure a connection with optimal settings
pub fn configure(conn: &Connection) -> Result<()> {
    // WAL keeps the old snapshot readable while a replace is in flight
    // and makes the commit crash-safe.
    conn.pragma_update(None, "journal_mode", "WAL")
        .map_err(from_rusqlite)?;
    conn.pragma_update(None, "synchronous", "NORMAL")
        .map_err(from_rusqlite)?;

    Ok(())
}
