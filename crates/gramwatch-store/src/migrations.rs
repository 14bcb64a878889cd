//! Embedded SQL migrations
//!
//! Migrations are embedded at compile time with include_str! and applied
//! idempotently; each one runs inside its own transaction and is recorded
//! in the schema_version table.

use crate::errors::{from_rusqlite, migration_error, Result};
use rusqlite::Connection;

/// Migration metadata
struct Migration {
    id: &'static str,
    sql: &'static str,
}

/// All embedded migrations, in order
fn get_migrations() -> Vec<Migration> {
    vec![Migration {
        id: "001_initial_schema",
        sql: include_str!("../migrations/001_initial_schema.sql"),
    }]
}

/// Apply all pending migrations to the database
pub fn apply_migrations(conn: &mut Connection) -> Result<()> {
    create_schema_version_table(conn)?;

    for migration in get_migrations() {
        apply_migration(conn, migration.id, migration.sql)?;
    }

    Ok(())
}

/// Create the schema_version table if it doesn't exist
fn create_schema_version_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY,
            migration_id TEXT NOT NULL UNIQUE,
            applied_at INTEGER NOT NULL
        )",
        [],
    )
    .map_err(from_rusqlite)?;

    Ok(())
}

/// Apply a single migration if not already applied
fn apply_migration(conn: &mut Connection, migration_id: &str, sql: &str) -> Result<()> {
    let already_applied: bool = conn
        .query_row(
            "SELECT 1 FROM schema_version WHERE migration_id = ?",
            [migration_id],
            |_| Ok(true),
        )
        .unwrap_or(false);

    if already_applied {
        return Ok(());
    }

    let tx = conn.transaction().map_err(from_rusqlite)?;

    tx.execute_batch(sql)
        .map_err(|e| migration_error(migration_id, &e.to_string()))?;

    let now = chrono::Utc::now().timestamp();
    tx.execute(
        "INSERT INTO schema_version (migration_id, applied_at) VALUES (?, ?)",
        rusqlite::params![migration_id, now],
    )
    .map_err(from_rusqlite)?;

    tx.commit().map_err(from_rusqlite)?;

    tracing::debug!(migration_id = %migration_id, "applied migration");
    Ok(())
}
