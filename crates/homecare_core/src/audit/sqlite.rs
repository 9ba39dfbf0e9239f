//! SQLite-backed audit sink.
//!
//! # Invariants
//! - Rows are inserted, never updated or deleted.
//! - Read paths reject unknown action/entity ids instead of masking them.

use super::{AuditEntry, AuditError, AuditSink};
use crate::model::auth::{Action, Entity};
use chrono::DateTime;
use rusqlite::{params, Connection, Row, ToSql};
use uuid::Uuid;

const AUDIT_SELECT_SQL: &str = "SELECT
    uuid,
    user_id,
    user_name,
    user_role,
    action,
    entity,
    entity_id,
    description,
    recorded_at
FROM audit_log";

/// Audit sink writing to the `audit_log` table.
pub struct SqliteAuditSink<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAuditSink<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Entries for one record, oldest first.
    pub fn list_for_entity(
        &self,
        entity: Entity,
        entity_id: &str,
    ) -> Result<Vec<AuditEntry>, AuditError> {
        self.query_entries(
            "WHERE entity = ?1 AND entity_id = ?2",
            params![entity.as_str(), entity_id],
        )
    }

    /// Entries recorded by one user, oldest first.
    pub fn list_for_user(&self, user_id: Uuid) -> Result<Vec<AuditEntry>, AuditError> {
        self.query_entries("WHERE user_id = ?1", params![user_id.to_string()])
    }

    pub fn count(&self) -> Result<u64, AuditError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM audit_log;", [], |row| {
                row.get::<_, i64>(0)
            })?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    fn query_entries(
        &self,
        filter: &str,
        params: &[&dyn ToSql],
    ) -> Result<Vec<AuditEntry>, AuditError> {
        let mut stmt = self.conn.prepare(&format!(
            "{AUDIT_SELECT_SQL} {filter} ORDER BY recorded_at ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query(params)?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_audit_row(row)?);
        }
        Ok(entries)
    }
}

impl AuditSink for SqliteAuditSink<'_> {
    fn record(&self, entry: &AuditEntry) -> Result<(), AuditError> {
        self.conn.execute(
            "INSERT INTO audit_log (
                uuid,
                user_id,
                user_name,
                user_role,
                action,
                entity,
                entity_id,
                description,
                recorded_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                entry.id.to_string(),
                entry.user_id.to_string(),
                entry.user_name.as_str(),
                entry.user_role.as_str(),
                entry.action.as_str(),
                entry.entity.as_str(),
                entry.entity_id.as_str(),
                entry.description.as_str(),
                entry.recorded_at.timestamp_millis(),
            ],
        )?;
        Ok(())
    }
}

fn parse_audit_row(row: &Row<'_>) -> Result<AuditEntry, AuditError> {
    let id = parse_uuid(row.get("uuid")?, "uuid")?;
    let user_id = parse_uuid(row.get("user_id")?, "user_id")?;

    let action_text: String = row.get("action")?;
    let action = Action::parse(&action_text).ok_or_else(|| {
        AuditError::InvalidData(format!("invalid action `{action_text}` in audit_log.action"))
    })?;

    let entity_text: String = row.get("entity")?;
    let entity = Entity::parse(&entity_text).ok_or_else(|| {
        AuditError::InvalidData(format!("invalid entity `{entity_text}` in audit_log.entity"))
    })?;

    let millis: i64 = row.get("recorded_at")?;
    let recorded_at = DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        AuditError::InvalidData(format!(
            "invalid timestamp `{millis}` in audit_log.recorded_at"
        ))
    })?;

    Ok(AuditEntry {
        id,
        user_id,
        user_name: row.get("user_name")?,
        user_role: row.get("user_role")?,
        action,
        entity,
        entity_id: row.get("entity_id")?,
        description: row.get("description")?,
        recorded_at,
    })
}

fn parse_uuid(value: String, column: &str) -> Result<Uuid, AuditError> {
    Uuid::parse_str(&value).map_err(|_| {
        AuditError::InvalidData(format!("invalid uuid value `{value}` in audit_log.{column}"))
    })
}
