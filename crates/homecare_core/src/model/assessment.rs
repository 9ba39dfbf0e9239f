//! Homecare eligibility assessments (ABEMID / NEAD).
//!
//! Scores are entered per criterion by the assessor; the instrument bands map
//! the total to a care complexity.

use crate::model::patient::PatientId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type AssessmentId = Uuid;

/// Clinical scoring instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentKind {
    Abemid,
    Nead,
}

impl AssessmentKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Abemid => "ABEMID",
            Self::Nead => "NEAD",
        }
    }

    /// Inclusive upper bounds of the not-eligible, low and medium bands.
    fn bands(self) -> (u32, u32, u32) {
        match self {
            Self::Abemid => (7, 12, 18),
            Self::Nead => (5, 11, 17),
        }
    }
}

/// Care complexity derived from an assessment total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    NotEligible,
    Low,
    Medium,
    High,
}

impl Complexity {
    /// pt-BR label.
    pub fn label(self) -> &'static str {
        match self {
            Self::NotEligible => "Sem indicação de internação domiciliar",
            Self::Low => "Baixa complexidade",
            Self::Medium => "Média complexidade",
            Self::High => "Alta complexidade",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionScore {
    pub criterion: String,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: AssessmentId,
    pub patient_id: PatientId,
    pub kind: AssessmentKind,
    pub scores: Vec<CriterionScore>,
    pub assessed_by: String,
    pub assessed_at: NaiveDateTime,
    pub notes: Option<String>,
}

impl Assessment {
    pub fn total_score(&self) -> u32 {
        self.scores
            .iter()
            .fold(0, |total: u32, entry| total.saturating_add(entry.score))
    }

    pub fn complexity(&self) -> Complexity {
        classify(self.kind, self.total_score())
    }
}

/// Maps an instrument total to its complexity band.
pub fn classify(kind: AssessmentKind, total: u32) -> Complexity {
    let (not_eligible, low, medium) = kind.bands();
    if total <= not_eligible {
        Complexity::NotEligible
    } else if total <= low {
        Complexity::Low
    } else if total <= medium {
        Complexity::Medium
    } else {
        Complexity::High
    }
}

#[cfg(test)]
mod tests {
    use super::{classify, AssessmentKind, Complexity};

    #[test]
    fn abemid_band_edges() {
        assert_eq!(classify(AssessmentKind::Abemid, 7), Complexity::NotEligible);
        assert_eq!(classify(AssessmentKind::Abemid, 8), Complexity::Low);
        assert_eq!(classify(AssessmentKind::Abemid, 18), Complexity::Medium);
        assert_eq!(classify(AssessmentKind::Abemid, 19), Complexity::High);
    }

    #[test]
    fn nead_band_edges() {
        assert_eq!(classify(AssessmentKind::Nead, 5), Complexity::NotEligible);
        assert_eq!(classify(AssessmentKind::Nead, 6), Complexity::Low);
        assert_eq!(classify(AssessmentKind::Nead, 12), Complexity::Medium);
        assert_eq!(classify(AssessmentKind::Nead, 18), Complexity::High);
    }
}
