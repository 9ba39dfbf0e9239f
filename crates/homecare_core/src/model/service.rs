//! Care service catalog model.

use crate::format::calculate_margin;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ServiceId = Uuid;

/// Billing unit of a care service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceUnit {
    Hour,
    Visit,
    Session,
    Day,
    Month,
}

impl ServiceUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Visit => "visit",
            Self::Session => "session",
            Self::Day => "day",
            Self::Month => "month",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "hour" => Some(Self::Hour),
            "visit" => Some(Self::Visit),
            "session" => Some(Self::Session),
            "day" => Some(Self::Day),
            "month" => Some(Self::Month),
            _ => None,
        }
    }

    /// pt-BR label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Hour => "Hora",
            Self::Visit => "Visita",
            Self::Session => "Sessão",
            Self::Day => "Diária",
            Self::Month => "Mensal",
        }
    }
}

/// A billable service offered to patients (nursing shift, physiotherapy
/// session, ...).
///
/// `price` and `cost` stay as floating reais because form input is forwarded
/// without validation and may carry `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareService {
    pub id: ServiceId,
    pub name: String,
    pub code: String,
    pub category: String,
    pub unit: ServiceUnit,
    pub cost: f64,
    pub price: f64,
    pub description: Option<String>,
    pub active: bool,
}

impl CareService {
    /// Gross margin percentage of `price` over `cost`.
    pub fn margin(&self) -> f64 {
        calculate_margin(self.cost, self.price)
    }
}
