//! Audit schema migrations.
//!
//! # Invariants
//! - Versions start at 1 and increase by one per script.
//! - All pending scripts of one open run in a single transaction.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::Connection;

/// `(version, script)` pairs in apply order.
const MIGRATIONS: &[(u32, &str)] = &[
    (1, include_str!("0001_audit_log.sql")),
    (2, include_str!("0002_audit_log_actor.sql")),
];

/// Schema version this build writes.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |(version, _)| *version)
}

/// Brings `conn` up to [`latest_version`].
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from_version = current_user_version(conn)?;
    let latest = latest_version();

    if from_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }
    if from_version == latest {
        debug!("event=db_migrate module=db status=skip version={from_version}");
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (version, sql) in MIGRATIONS.iter().filter(|(version, _)| *version > from_version) {
        tx.execute_batch(sql)
            .and_then(|()| tx.pragma_update(None, "user_version", version))
            .map_err(|source| DbError::Migration {
                version: *version,
                source,
            })?;
        debug!("event=db_migrate_step module=db status=ok version={version}");
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={from_version} to_version={latest}");
    Ok(())
}

/// Reads `PRAGMA user_version`.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?)
}
