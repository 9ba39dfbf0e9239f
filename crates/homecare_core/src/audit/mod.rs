//! Audit trail of user-initiated changes.
//!
//! # Responsibility
//! - Define the audit record appended after state transitions.
//! - Abstract the sink so modules can record best-effort without knowing the
//!   storage.
//!
//! # Invariants
//! - Actor identity always comes from the acting `Session`.
//! - Sinks are append-only.

use crate::db::DbError;
use crate::model::auth::{Action, Entity, Session};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

mod memory;
mod sqlite;

pub use memory::MemoryAuditSink;
pub use sqlite::SqliteAuditSink;

/// One audited action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_role: String,
    pub action: Action,
    pub entity: Entity,
    pub entity_id: String,
    pub description: String,
    pub recorded_at: DateTime<Utc>,
}

impl AuditEntry {
    /// Builds an entry attributed to the session user.
    pub fn from_session(
        session: &Session,
        action: Action,
        entity: Entity,
        entity_id: impl Into<String>,
        description: impl Into<String>,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: session.user_id,
            user_name: session.user_name.clone(),
            user_role: session.role.id.clone(),
            action,
            entity,
            entity_id: entity_id.into(),
            description: description.into(),
            recorded_at,
        }
    }
}

#[derive(Debug)]
pub enum AuditError {
    Db(DbError),
    InvalidData(String),
    Unavailable(String),
}

impl Display for AuditError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted audit data: {message}"),
            Self::Unavailable(message) => write!(f, "audit sink unavailable: {message}"),
        }
    }
}

impl Error for AuditError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for AuditError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for AuditError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Append-only destination for audit entries.
pub trait AuditSink {
    fn record(&self, entry: &AuditEntry) -> Result<(), AuditError>;
}

impl<S: AuditSink + ?Sized> AuditSink for &S {
    fn record(&self, entry: &AuditEntry) -> Result<(), AuditError> {
        (**self).record(entry)
    }
}
