//! Access-control vocabulary and the acting user session.
//!
//! # Responsibility
//! - Define the `action x entity` permission matrix granted through roles.
//! - Carry the current user identity into audited operations.
//!
//! # Invariants
//! - Roles deny by default; only declared permissions are allowed.
//! - Action/entity string ids are stable and used in audit records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    Approve,
    Export,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Self::Create,
        Self::Read,
        Self::Update,
        Self::Delete,
        Self::Approve,
        Self::Export,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Approve => "approve",
            Self::Export => "export",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == value.trim())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Patient,
    Professional,
    Budget,
    PriceTable,
    Service,
    Schedule,
    Assessment,
    Notification,
    Finance,
    User,
}

impl Entity {
    pub const ALL: [Entity; 10] = [
        Self::Patient,
        Self::Professional,
        Self::Budget,
        Self::PriceTable,
        Self::Service,
        Self::Schedule,
        Self::Assessment,
        Self::Notification,
        Self::Finance,
        Self::User,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Professional => "professional",
            Self::Budget => "budget",
            Self::PriceTable => "price_table",
            Self::Service => "service",
            Self::Schedule => "schedule",
            Self::Assessment => "assessment",
            Self::Notification => "notification",
            Self::Finance => "finance",
            Self::User => "user",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|entity| entity.as_str() == value.trim())
    }
}

/// One cell of the access-control matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Permission {
    pub action: Action,
    pub entity: Entity,
}

impl Permission {
    pub fn new(action: Action, entity: Entity) -> Self {
        Self { action, entity }
    }
}

/// Named set of permissions assigned to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub permissions: BTreeSet<Permission>,
}

impl Role {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            permissions: BTreeSet::new(),
        }
    }

    /// Role granted every action on every entity.
    pub fn administrator() -> Self {
        let mut role = Self::new("admin", "Administrador");
        for action in Action::ALL {
            for entity in Entity::ALL {
                role.grant(action, entity);
            }
        }
        role
    }

    pub fn grant(&mut self, action: Action, entity: Entity) {
        self.permissions.insert(Permission::new(action, entity));
    }

    pub fn revoke(&mut self, action: Action, entity: Entity) {
        self.permissions.remove(&Permission::new(action, entity));
    }

    pub fn allows(&self, action: Action, entity: Entity) -> bool {
        self.permissions.contains(&Permission::new(action, entity))
    }
}

/// Authenticated user on whose behalf an operation runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: Uuid,
    pub user_name: String,
    pub role: Role,
}

impl Session {
    pub fn new(user_id: Uuid, user_name: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            user_name: user_name.into(),
            role,
        }
    }

    pub fn can(&self, action: Action, entity: Entity) -> bool {
        self.role.allows(action, entity)
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, Entity, Role};

    #[test]
    fn role_denies_by_default() {
        let mut role = Role::new("nurse", "Enfermagem");
        assert!(!role.allows(Action::Read, Entity::Patient));

        role.grant(Action::Read, Entity::Patient);
        assert!(role.allows(Action::Read, Entity::Patient));
        assert!(!role.allows(Action::Update, Entity::Patient));

        role.revoke(Action::Read, Entity::Patient);
        assert!(!role.allows(Action::Read, Entity::Patient));
    }

    #[test]
    fn administrator_covers_full_matrix() {
        let admin = Role::administrator();
        assert_eq!(
            admin.permissions.len(),
            Action::ALL.len() * Entity::ALL.len()
        );
    }

    #[test]
    fn string_ids_round_trip() {
        for action in Action::ALL {
            assert_eq!(Action::parse(action.as_str()), Some(action));
        }
        for entity in Entity::ALL {
            assert_eq!(Entity::parse(entity.as_str()), Some(entity));
        }
        assert_eq!(Entity::parse("invoice"), None);
    }
}
