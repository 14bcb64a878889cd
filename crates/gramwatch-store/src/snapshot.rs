//! SQLite-backed snapshot store.
//!
//! One database file per monitored account (`<data_dir>/<account>_monitor.db`),
//! one table per relation kind. `replace` is a single transaction doing a
//! full DELETE then bulk INSERT, so an interrupted commit leaves the fully
//! old or fully new set on the next read, never a mixture.

use crate::errors::{from_rusqlite, io_error, Result};
use crate::{db, migrations};
use chrono::{DateTime, Utc};
use gramwatch_core::run::SnapshotStore;
use gramwatch_core_types::{Identity, RelationKind};
use rusqlite::Connection;
use std::collections::HashSet;
use std::path::Path;

/// Persistent snapshot store for one monitored account.
pub struct SqliteSnapshotStore {
    conn: Connection,
    account: Identity,
}

impl SqliteSnapshotStore {
    /// Open (creating on first use) the store partition for `account`.
    ///
    /// The data directory is created if absent; a brand-new database is a
    /// valid empty baseline, not an error.
    pub fn open(data_dir: &Path, account: &Identity) -> Result<Self> {
        std::fs::create_dir_all(data_dir).map_err(|e| io_error("create_data_dir", e))?;
        let path = data_dir.join(format!("{}_monitor.db", account));
        let mut conn = db::open(&path)?;
        db::configure(&conn)?;
        migrations::apply_migrations(&mut conn)?;
        tracing::debug!(account = %account, path = %path.display(), "opened snapshot store");
        Ok(Self {
            conn,
            account: account.clone(),
        })
    }

    /// In-memory store for tests.
    pub fn open_in_memory(account: &Identity) -> Result<Self> {
        let mut conn = db::open_in_memory()?;
        migrations::apply_migrations(&mut conn)?;
        Ok(Self {
            conn,
            account: account.clone(),
        })
    }

    /// The account this partition belongs to.
    pub fn account(&self) -> &Identity {
        &self.account
    }
}

// Table names come from RelationKind::as_str(), a closed set of constants,
// so formatting them into SQL is safe.
impl SnapshotStore for SqliteSnapshotStore {
    fn load(&mut self, kind: RelationKind) -> Result<HashSet<Identity>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT username FROM {}", kind.as_str()))
            .map_err(from_rusqlite)?;
        let members = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?
            .into_iter()
            .map(Identity::from)
            .collect::<HashSet<_>>();
        tracing::debug!(
            account = %self.account,
            relation = %kind,
            member_count = members.len(),
            "loaded previous snapshot"
        );
        Ok(members)
    }

    fn replace(
        &mut self,
        kind: RelationKind,
        current: &HashSet<Identity>,
        as_of: DateTime<Utc>,
    ) -> Result<()> {
        let tx = self.conn.transaction().map_err(from_rusqlite)?;

        tx.execute(&format!("DELETE FROM {}", kind.as_str()), [])
            .map_err(from_rusqlite)?;

        {
            let mut stmt = tx
                .prepare(&format!(
                    "INSERT INTO {} (username, last_seen) VALUES (?1, ?2)",
                    kind.as_str()
                ))
                .map_err(from_rusqlite)?;
            let last_seen = as_of.to_rfc3339();
            for member in current {
                stmt.execute(rusqlite::params![member.as_str(), last_seen])
                    .map_err(from_rusqlite)?;
            }
        }

        tx.commit().map_err(from_rusqlite)?;
        tracing::debug!(
            account = %self.account,
            relation = %kind,
            member_count = current.len(),
            "committed snapshot"
        );
        Ok(())
    }
}
