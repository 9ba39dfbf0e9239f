//! Professional registration form binding.

use crate::form::{invalid_option, optional_text, require_text, FormError, FormField, FormModel};
use crate::model::professional::{Professional, ProfessionalKind, ProfessionalStatus};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfessionalField {
    Name,
    Cpf,
    Email,
    Phone,
    Kind,
    Specialty,
    CouncilNumber,
    Status,
}

impl FormField for ProfessionalField {
    const ALL: &'static [Self] = &[
        Self::Name,
        Self::Cpf,
        Self::Email,
        Self::Phone,
        Self::Kind,
        Self::Specialty,
        Self::CouncilNumber,
        Self::Status,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Cpf => "cpf",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Kind => "type",
            Self::Specialty => "specialty",
            Self::CouncilNumber => "councilNumber",
            Self::Status => "status",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfessionalPatch {
    Name(String),
    Cpf(String),
    Email(String),
    Phone(String),
    Kind(Option<ProfessionalKind>),
    Specialty(Option<String>),
    CouncilNumber(Option<String>),
    Status(ProfessionalStatus),
}

/// Field bag; `kind` stays unset until the user picks one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfessionalFormData {
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub phone: String,
    pub kind: Option<ProfessionalKind>,
    pub specialty: Option<String>,
    pub council_number: Option<String>,
    pub status: ProfessionalStatus,
}

impl Default for ProfessionalFormData {
    fn default() -> Self {
        Self {
            name: String::new(),
            cpf: String::new(),
            email: String::new(),
            phone: String::new(),
            kind: None,
            specialty: None,
            council_number: None,
            status: ProfessionalStatus::Active,
        }
    }
}

impl ProfessionalFormData {
    /// Loads an existing record for editing.
    pub fn from_professional(professional: &Professional) -> Self {
        Self {
            name: professional.name.clone(),
            cpf: professional.cpf.clone(),
            email: professional.email.clone(),
            phone: professional.phone.clone(),
            kind: Some(professional.kind),
            specialty: professional.specialty.clone(),
            council_number: professional.council_number.clone(),
            status: professional.status,
        }
    }

    /// Builds a record; name, CPF and kind are required.
    pub fn build(&self) -> Result<Professional, FormError> {
        Ok(Professional {
            id: Uuid::new_v4(),
            name: require_text(&self.name, ProfessionalField::Name.as_str())?,
            cpf: require_text(&self.cpf, ProfessionalField::Cpf.as_str())?,
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            kind: self
                .kind
                .ok_or(FormError::MissingField(ProfessionalField::Kind.as_str()))?,
            specialty: self.specialty.clone(),
            council_number: self.council_number.clone(),
            status: self.status,
        })
    }
}

impl FormModel for ProfessionalFormData {
    type Field = ProfessionalField;
    type Patch = ProfessionalPatch;

    fn parse_input(field: ProfessionalField, raw: &str) -> Result<ProfessionalPatch, FormError> {
        let name = field.as_str();
        Ok(match field {
            ProfessionalField::Name => ProfessionalPatch::Name(raw.to_string()),
            ProfessionalField::Cpf => ProfessionalPatch::Cpf(raw.to_string()),
            ProfessionalField::Email => ProfessionalPatch::Email(raw.to_string()),
            ProfessionalField::Phone => ProfessionalPatch::Phone(raw.to_string()),
            ProfessionalField::Kind => match optional_text(raw) {
                None => ProfessionalPatch::Kind(None),
                Some(text) => ProfessionalPatch::Kind(Some(
                    ProfessionalKind::parse(&text).ok_or_else(|| invalid_option(name, raw))?,
                )),
            },
            ProfessionalField::Specialty => ProfessionalPatch::Specialty(optional_text(raw)),
            ProfessionalField::CouncilNumber => {
                ProfessionalPatch::CouncilNumber(optional_text(raw))
            }
            ProfessionalField::Status => ProfessionalPatch::Status(
                ProfessionalStatus::parse(raw).ok_or_else(|| invalid_option(name, raw))?,
            ),
        })
    }

    fn apply(&mut self, patch: ProfessionalPatch) {
        match patch {
            ProfessionalPatch::Name(value) => self.name = value,
            ProfessionalPatch::Cpf(value) => self.cpf = value,
            ProfessionalPatch::Email(value) => self.email = value,
            ProfessionalPatch::Phone(value) => self.phone = value,
            ProfessionalPatch::Kind(value) => self.kind = value,
            ProfessionalPatch::Specialty(value) => self.specialty = value,
            ProfessionalPatch::CouncilNumber(value) => self.council_number = value,
            ProfessionalPatch::Status(value) => self.status = value,
        }
    }

    fn value(&self, field: ProfessionalField) -> String {
        match field {
            ProfessionalField::Name => self.name.clone(),
            ProfessionalField::Cpf => self.cpf.clone(),
            ProfessionalField::Email => self.email.clone(),
            ProfessionalField::Phone => self.phone.clone(),
            ProfessionalField::Kind => self
                .kind
                .map(|kind| kind.as_str().to_string())
                .unwrap_or_default(),
            ProfessionalField::Specialty => self.specialty.clone().unwrap_or_default(),
            ProfessionalField::CouncilNumber => self.council_number.clone().unwrap_or_default(),
            ProfessionalField::Status => self.status.as_str().to_string(),
        }
    }
}
