//! Patient record.

use crate::format::get_age;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type PatientId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatientStatus {
    Active,
    Inactive,
    Discharged,
    Deceased,
}

impl PatientStatus {
    /// pt-BR label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Ativo",
            Self::Inactive => "Inativo",
            Self::Discharged => "Alta",
            Self::Deceased => "Óbito",
        }
    }
}

/// Homecare patient. `cpf` and `phone` keep the raw stored text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub birth_date: NaiveDate,
    pub cpf: String,
    pub phone: String,
    pub address: Option<String>,
    pub health_plan: Option<String>,
    pub status: PatientStatus,
}

impl Patient {
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        get_age(self.birth_date, today)
    }
}
