//! Administrative notification model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type NotificationId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Alert,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Alert => "alert",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "info" => Some(Self::Info),
            "success" => Some(Self::Success),
            "warning" => Some(Self::Warning),
            "alert" => Some(Self::Alert),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPriority {
    Low,
    Normal,
    High,
}

impl NotificationPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "low" => Some(Self::Low),
            "normal" => Some(Self::Normal),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Who receives a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum NotificationAudience {
    Everyone,
    Role(String),
    User(Uuid),
}

impl NotificationAudience {
    /// Parses `all`, `role:<name>` or `user:<uuid>`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value == "all" {
            return Some(Self::Everyone);
        }
        if let Some(role) = value.strip_prefix("role:") {
            let role = role.trim();
            return (!role.is_empty()).then(|| Self::Role(role.to_string()));
        }
        value
            .strip_prefix("user:")
            .and_then(|id| Uuid::parse_str(id.trim()).ok())
            .map(Self::User)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub priority: NotificationPriority,
    pub audience: NotificationAudience,
    pub scheduled_for: Option<NaiveDateTime>,
    pub read: bool,
}

impl Notification {
    pub fn mark_read(&mut self) {
        self.read = true;
    }
}
