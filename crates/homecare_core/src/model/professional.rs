//! Care professional record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ProfessionalId = Uuid;

/// Clinical role of a professional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfessionalKind {
    Nurse,
    NursingTechnician,
    Physician,
    Physiotherapist,
    Nutritionist,
    SpeechTherapist,
    Psychologist,
    Caregiver,
}

impl ProfessionalKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nurse => "nurse",
            Self::NursingTechnician => "nursing_technician",
            Self::Physician => "physician",
            Self::Physiotherapist => "physiotherapist",
            Self::Nutritionist => "nutritionist",
            Self::SpeechTherapist => "speech_therapist",
            Self::Psychologist => "psychologist",
            Self::Caregiver => "caregiver",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "nurse" => Some(Self::Nurse),
            "nursing_technician" => Some(Self::NursingTechnician),
            "physician" => Some(Self::Physician),
            "physiotherapist" => Some(Self::Physiotherapist),
            "nutritionist" => Some(Self::Nutritionist),
            "speech_therapist" => Some(Self::SpeechTherapist),
            "psychologist" => Some(Self::Psychologist),
            "caregiver" => Some(Self::Caregiver),
            _ => None,
        }
    }

    /// pt-BR label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Nurse => "Enfermeiro(a)",
            Self::NursingTechnician => "Técnico(a) de Enfermagem",
            Self::Physician => "Médico(a)",
            Self::Physiotherapist => "Fisioterapeuta",
            Self::Nutritionist => "Nutricionista",
            Self::SpeechTherapist => "Fonoaudiólogo(a)",
            Self::Psychologist => "Psicólogo(a)",
            Self::Caregiver => "Cuidador(a)",
        }
    }

    /// Name of the professional council that issues the registration number.
    pub fn council(self) -> Option<&'static str> {
        match self {
            Self::Nurse | Self::NursingTechnician => Some("COREN"),
            Self::Physician => Some("CRM"),
            Self::Physiotherapist => Some("CREFITO"),
            Self::Nutritionist => Some("CRN"),
            Self::SpeechTherapist => Some("CRFa"),
            Self::Psychologist => Some("CRP"),
            Self::Caregiver => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfessionalStatus {
    Active,
    Inactive,
    OnLeave,
}

impl ProfessionalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::OnLeave => "on_leave",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "on_leave" => Some(Self::OnLeave),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Ativo",
            Self::Inactive => "Inativo",
            Self::OnLeave => "Afastado",
        }
    }
}

/// Professional registered to deliver care shifts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Professional {
    pub id: ProfessionalId,
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub phone: String,
    pub kind: ProfessionalKind,
    pub specialty: Option<String>,
    pub council_number: Option<String>,
    pub status: ProfessionalStatus,
}
