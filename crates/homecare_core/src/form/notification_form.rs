//! Notification form binding.

use crate::form::{invalid_option, optional_text, require_text, FormError, FormField, FormModel};
use crate::model::notification::{
    Notification, NotificationAudience, NotificationKind, NotificationPriority,
};
use chrono::NaiveDateTime;
use uuid::Uuid;

const SCHEDULE_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationField {
    Title,
    Message,
    Kind,
    Priority,
    Audience,
    ScheduledFor,
}

impl FormField for NotificationField {
    const ALL: &'static [Self] = &[
        Self::Title,
        Self::Message,
        Self::Kind,
        Self::Priority,
        Self::Audience,
        Self::ScheduledFor,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Message => "message",
            Self::Kind => "type",
            Self::Priority => "priority",
            Self::Audience => "audience",
            Self::ScheduledFor => "scheduledFor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationPatch {
    Title(String),
    Message(String),
    Kind(NotificationKind),
    Priority(NotificationPriority),
    Audience(NotificationAudience),
    ScheduledFor(Option<NaiveDateTime>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationFormData {
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub priority: NotificationPriority,
    pub audience: NotificationAudience,
    pub scheduled_for: Option<NaiveDateTime>,
}

impl Default for NotificationFormData {
    fn default() -> Self {
        Self {
            title: String::new(),
            message: String::new(),
            kind: NotificationKind::Info,
            priority: NotificationPriority::Normal,
            audience: NotificationAudience::Everyone,
            scheduled_for: None,
        }
    }
}

impl NotificationFormData {
    /// Builds an unread notification; title and message are required.
    pub fn build(&self) -> Result<Notification, FormError> {
        Ok(Notification {
            id: Uuid::new_v4(),
            title: require_text(&self.title, NotificationField::Title.as_str())?,
            message: require_text(&self.message, NotificationField::Message.as_str())?,
            kind: self.kind,
            priority: self.priority,
            audience: self.audience.clone(),
            scheduled_for: self.scheduled_for,
            read: false,
        })
    }
}

impl FormModel for NotificationFormData {
    type Field = NotificationField;
    type Patch = NotificationPatch;

    fn parse_input(field: NotificationField, raw: &str) -> Result<NotificationPatch, FormError> {
        let name = field.as_str();
        Ok(match field {
            NotificationField::Title => NotificationPatch::Title(raw.to_string()),
            NotificationField::Message => NotificationPatch::Message(raw.to_string()),
            NotificationField::Kind => NotificationPatch::Kind(
                NotificationKind::parse(raw).ok_or_else(|| invalid_option(name, raw))?,
            ),
            NotificationField::Priority => NotificationPatch::Priority(
                NotificationPriority::parse(raw).ok_or_else(|| invalid_option(name, raw))?,
            ),
            NotificationField::Audience => NotificationPatch::Audience(
                NotificationAudience::parse(raw).ok_or_else(|| invalid_option(name, raw))?,
            ),
            NotificationField::ScheduledFor => match optional_text(raw) {
                None => NotificationPatch::ScheduledFor(None),
                Some(text) => NotificationPatch::ScheduledFor(Some(
                    NaiveDateTime::parse_from_str(&text, SCHEDULE_INPUT_FORMAT)
                        .map_err(|_| invalid_option(name, raw))?,
                )),
            },
        })
    }

    fn apply(&mut self, patch: NotificationPatch) {
        match patch {
            NotificationPatch::Title(value) => self.title = value,
            NotificationPatch::Message(value) => self.message = value,
            NotificationPatch::Kind(value) => self.kind = value,
            NotificationPatch::Priority(value) => self.priority = value,
            NotificationPatch::Audience(value) => self.audience = value,
            NotificationPatch::ScheduledFor(value) => self.scheduled_for = value,
        }
    }

    fn value(&self, field: NotificationField) -> String {
        match field {
            NotificationField::Title => self.title.clone(),
            NotificationField::Message => self.message.clone(),
            NotificationField::Kind => self.kind.as_str().to_string(),
            NotificationField::Priority => self.priority.as_str().to_string(),
            NotificationField::Audience => match &self.audience {
                NotificationAudience::Everyone => "all".to_string(),
                NotificationAudience::Role(role) => format!("role:{role}"),
                NotificationAudience::User(id) => format!("user:{id}"),
            },
            NotificationField::ScheduledFor => self
                .scheduled_for
                .map(|value| value.format(SCHEDULE_INPUT_FORMAT).to_string())
                .unwrap_or_default(),
        }
    }
}
