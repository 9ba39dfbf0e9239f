//! Patient and professional detail pages.
//!
//! # Responsibility
//! - Read the `id` path parameter and resolve the record it names.
//! - Project the record into display-ready, pt-BR formatted fields.
//!
//! # Invariants
//! - A missing or blank `id` is an error, never an assumed value.
//! - Malformed stored CPF/phone values are shown raw rather than failing the
//!   page.

use crate::format::{format_cpf, format_date, format_phone};
use crate::model::patient::{Patient, PatientId};
use crate::model::professional::{Professional, ProfessionalId};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub const ID_PARAM: &str = "id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    MissingParam(&'static str),
    InvalidParam { name: &'static str, value: String },
}

impl Display for RouteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingParam(name) => write!(f, "missing route parameter `{name}`"),
            Self::InvalidParam { name, value } => {
                write!(f, "invalid route parameter `{name}`: `{value}`")
            }
        }
    }
}

impl Error for RouteError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailError {
    Route(RouteError),
    NotFound { entity: &'static str, id: Uuid },
}

impl Display for DetailError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Route(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
        }
    }
}

impl Error for DetailError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Route(err) => Some(err),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<RouteError> for DetailError {
    fn from(value: RouteError) -> Self {
        Self::Route(value)
    }
}

/// Path parameters captured by the router.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    values: HashMap<String, String>,
}

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Returns a non-blank parameter.
    pub fn require(&self, name: &'static str) -> Result<&str, RouteError> {
        self.get(name)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(RouteError::MissingParam(name))
    }

    /// Returns a required parameter parsed as UUID.
    pub fn require_uuid(&self, name: &'static str) -> Result<Uuid, RouteError> {
        let value = self.require(name)?;
        Uuid::parse_str(value).map_err(|_| RouteError::InvalidParam {
            name,
            value: value.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientDetailView {
    pub id: PatientId,
    pub name: String,
    pub birth_date: String,
    pub age: i32,
    pub cpf: String,
    pub phone: String,
    pub address: String,
    pub health_plan: String,
    pub status: &'static str,
}

impl PatientDetailView {
    pub fn from_patient(patient: &Patient, today: NaiveDate) -> Self {
        Self {
            id: patient.id,
            name: patient.name.clone(),
            birth_date: format_date(patient.birth_date),
            age: patient.age_on(today),
            cpf: format_cpf(&patient.cpf).unwrap_or_else(|_| patient.cpf.clone()),
            phone: format_phone(&patient.phone).unwrap_or_else(|_| patient.phone.clone()),
            address: patient.address.clone().unwrap_or_default(),
            health_plan: patient
                .health_plan
                .clone()
                .unwrap_or_else(|| "Particular".to_string()),
            status: patient.status.label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfessionalDetailView {
    pub id: ProfessionalId,
    pub name: String,
    pub kind: &'static str,
    pub registration: String,
    pub specialty: String,
    pub cpf: String,
    pub phone: String,
    pub email: String,
    pub status: &'static str,
}

impl ProfessionalDetailView {
    pub fn from_professional(professional: &Professional) -> Self {
        let registration = match (professional.kind.council(), &professional.council_number) {
            (Some(council), Some(number)) => format!("{council} {number}"),
            (None, Some(number)) => number.clone(),
            (_, None) => String::new(),
        };

        Self {
            id: professional.id,
            name: professional.name.clone(),
            kind: professional.kind.label(),
            registration,
            specialty: professional.specialty.clone().unwrap_or_default(),
            cpf: format_cpf(&professional.cpf).unwrap_or_else(|_| professional.cpf.clone()),
            phone: format_phone(&professional.phone)
                .unwrap_or_else(|_| professional.phone.clone()),
            email: professional.email.clone(),
            status: professional.status.label(),
        }
    }
}

/// Resolves the patient named by the `id` route parameter.
pub fn patient_detail(
    params: &RouteParams,
    patients: &[Patient],
    today: NaiveDate,
) -> Result<PatientDetailView, DetailError> {
    let id = params.require_uuid(ID_PARAM)?;
    patients
        .iter()
        .find(|patient| patient.id == id)
        .map(|patient| PatientDetailView::from_patient(patient, today))
        .ok_or(DetailError::NotFound {
            entity: "patient",
            id,
        })
}

/// Resolves the professional named by the `id` route parameter.
pub fn professional_detail(
    params: &RouteParams,
    professionals: &[Professional],
) -> Result<ProfessionalDetailView, DetailError> {
    let id = params.require_uuid(ID_PARAM)?;
    professionals
        .iter()
        .find(|professional| professional.id == id)
        .map(ProfessionalDetailView::from_professional)
        .ok_or(DetailError::NotFound {
            entity: "professional",
            id,
        })
}
