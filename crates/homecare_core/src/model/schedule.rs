//! Care shift schedule and geolocated attendance records.
//!
//! # Invariants
//! - A schedule entry accepts at most one check-in and one check-out.
//! - Check-out requires a prior check-in, is not earlier than it, and only
//!   completes a shift that is still in progress.
//! - Every attendance record belongs to the entry it is recorded on.

use crate::model::patient::PatientId;
use crate::model::professional::ProfessionalId;
use crate::model::service::ServiceId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type ScheduleId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Scheduled,
    InProgress,
    Completed,
    Missed,
    Cancelled,
}

impl ScheduleStatus {
    /// pt-BR label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Scheduled => "Agendado",
            Self::InProgress => "Em andamento",
            Self::Completed => "Concluído",
            Self::Missed => "Falta",
            Self::Cancelled => "Cancelado",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    CheckIn,
    CheckOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Attendance record captured on the professional's device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInOut {
    pub id: Uuid,
    pub schedule_id: ScheduleId,
    pub professional_id: ProfessionalId,
    #[serde(rename = "type")]
    pub kind: CheckKind,
    pub timestamp: NaiveDateTime,
    pub location: Option<GeoPoint>,
}

impl CheckInOut {
    pub fn new(
        schedule_id: ScheduleId,
        professional_id: ProfessionalId,
        kind: CheckKind,
        timestamp: NaiveDateTime,
        location: Option<GeoPoint>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            schedule_id,
            professional_id,
            kind,
            timestamp,
            location,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    WrongSchedule {
        expected: ScheduleId,
        actual: ScheduleId,
    },
    WrongProfessional(ProfessionalId),
    AlreadyCheckedIn,
    AlreadyCheckedOut,
    CheckOutWithoutCheckIn,
    CheckOutBeforeCheckIn,
    NotActive(ScheduleStatus),
}

impl Display for ScheduleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongSchedule { expected, actual } => write!(
                f,
                "attendance record for schedule {actual} cannot be recorded on {expected}"
            ),
            Self::WrongProfessional(id) => {
                write!(f, "professional {id} is not assigned to this schedule")
            }
            Self::AlreadyCheckedIn => write!(f, "schedule already has a check-in"),
            Self::AlreadyCheckedOut => write!(f, "schedule already has a check-out"),
            Self::CheckOutWithoutCheckIn => write!(f, "check-out requires a prior check-in"),
            Self::CheckOutBeforeCheckIn => write!(f, "check-out must not precede check-in"),
            Self::NotActive(status) => {
                write!(f, "schedule is not active: {}", status.label())
            }
        }
    }
}

impl Error for ScheduleError {}

/// One care shift for a patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub id: ScheduleId,
    pub patient_id: PatientId,
    pub professional_id: ProfessionalId,
    pub service_id: ServiceId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub status: ScheduleStatus,
    pub check_in: Option<CheckInOut>,
    pub check_out: Option<CheckInOut>,
}

impl ScheduleEntry {
    pub fn new(
        patient_id: PatientId,
        professional_id: ProfessionalId,
        service_id: ServiceId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            patient_id,
            professional_id,
            service_id,
            start,
            end,
            status: ScheduleStatus::Scheduled,
            check_in: None,
            check_out: None,
        }
    }

    /// Records a check-in or check-out and advances the status.
    ///
    /// `scheduled -> in_progress` on check-in, `in_progress -> completed` on
    /// check-out.
    pub fn record_check(&mut self, check: CheckInOut) -> Result<(), ScheduleError> {
        if check.schedule_id != self.id {
            return Err(ScheduleError::WrongSchedule {
                expected: self.id,
                actual: check.schedule_id,
            });
        }
        if check.professional_id != self.professional_id {
            return Err(ScheduleError::WrongProfessional(check.professional_id));
        }

        match check.kind {
            CheckKind::CheckIn => {
                if self.check_in.is_some() {
                    return Err(ScheduleError::AlreadyCheckedIn);
                }
                if self.status != ScheduleStatus::Scheduled {
                    return Err(ScheduleError::NotActive(self.status));
                }
                self.check_in = Some(check);
                self.status = ScheduleStatus::InProgress;
            }
            CheckKind::CheckOut => {
                if self.check_out.is_some() {
                    return Err(ScheduleError::AlreadyCheckedOut);
                }
                let check_in = self
                    .check_in
                    .as_ref()
                    .ok_or(ScheduleError::CheckOutWithoutCheckIn)?;
                if check.timestamp < check_in.timestamp {
                    return Err(ScheduleError::CheckOutBeforeCheckIn);
                }
                if self.status != ScheduleStatus::InProgress {
                    return Err(ScheduleError::NotActive(self.status));
                }
                self.check_out = Some(check);
                self.status = ScheduleStatus::Completed;
            }
        }

        Ok(())
    }

    /// Minutes between check-in and check-out, once both exist.
    pub fn worked_minutes(&self) -> Option<i64> {
        let check_in = self.check_in.as_ref()?;
        let check_out = self.check_out.as_ref()?;
        Some((check_out.timestamp - check_in.timestamp).num_minutes())
    }

    /// Planned shift length in minutes.
    pub fn planned_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}
