use chrono::{NaiveDate, NaiveDateTime};
use homecare_core::model::assessment::{Assessment, AssessmentKind, Complexity, CriterionScore};
use homecare_core::model::schedule::{
    CheckInOut, CheckKind, GeoPoint, ScheduleEntry, ScheduleError, ScheduleStatus,
};
use uuid::Uuid;

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 5, 20)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn shift() -> ScheduleEntry {
    ScheduleEntry::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        Uuid::new_v4(),
        at(7, 0),
        at(19, 0),
    )
}

fn check(entry: &ScheduleEntry, kind: CheckKind, timestamp: NaiveDateTime) -> CheckInOut {
    CheckInOut::new(
        entry.id,
        entry.professional_id,
        kind,
        timestamp,
        Some(GeoPoint {
            latitude: -23.5505,
            longitude: -46.6333,
        }),
    )
}

#[test]
fn check_in_then_check_out_completes_the_shift() {
    let mut entry = shift();
    assert_eq!(entry.planned_minutes(), 720);
    assert_eq!(entry.worked_minutes(), None);

    entry
        .record_check(check(&entry, CheckKind::CheckIn, at(7, 5)))
        .unwrap();
    assert_eq!(entry.status, ScheduleStatus::InProgress);
    assert_eq!(entry.worked_minutes(), None);

    entry
        .record_check(check(&entry, CheckKind::CheckOut, at(19, 2)))
        .unwrap();
    assert_eq!(entry.status, ScheduleStatus::Completed);
    assert_eq!(entry.worked_minutes(), Some(717));
}

#[test]
fn attendance_pairing_is_enforced() {
    let mut entry = shift();
    assert_eq!(
        entry.record_check(check(&entry, CheckKind::CheckOut, at(19, 0))),
        Err(ScheduleError::CheckOutWithoutCheckIn)
    );

    entry
        .record_check(check(&entry, CheckKind::CheckIn, at(7, 0)))
        .unwrap();
    assert_eq!(
        entry.record_check(check(&entry, CheckKind::CheckIn, at(7, 1))),
        Err(ScheduleError::AlreadyCheckedIn)
    );
    assert_eq!(
        entry.record_check(check(&entry, CheckKind::CheckOut, at(6, 59))),
        Err(ScheduleError::CheckOutBeforeCheckIn)
    );

    entry
        .record_check(check(&entry, CheckKind::CheckOut, at(19, 0)))
        .unwrap();
    assert_eq!(
        entry.record_check(check(&entry, CheckKind::CheckOut, at(19, 5))),
        Err(ScheduleError::AlreadyCheckedOut)
    );
}

#[test]
fn foreign_records_are_rejected() {
    let mut entry = shift();
    let other = shift();

    assert_eq!(
        entry.record_check(check(&other, CheckKind::CheckIn, at(7, 0))),
        Err(ScheduleError::WrongSchedule {
            expected: entry.id,
            actual: other.id
        })
    );

    let stranger = Uuid::new_v4();
    let record = CheckInOut::new(entry.id, stranger, CheckKind::CheckIn, at(7, 0), None);
    assert_eq!(
        entry.record_check(record),
        Err(ScheduleError::WrongProfessional(stranger))
    );
}

#[test]
fn cancelled_shift_refuses_check_in() {
    let mut entry = shift();
    entry.status = ScheduleStatus::Cancelled;

    let err = entry
        .record_check(check(&entry, CheckKind::CheckIn, at(7, 0)))
        .unwrap_err();
    assert_eq!(err, ScheduleError::NotActive(ScheduleStatus::Cancelled));
    assert_eq!(err.to_string(), "schedule is not active: Cancelado");
}

#[test]
fn check_out_requires_a_shift_in_progress() {
    for status in [ScheduleStatus::Cancelled, ScheduleStatus::Missed] {
        let mut entry = shift();
        entry
            .record_check(check(&entry, CheckKind::CheckIn, at(7, 0)))
            .unwrap();
        entry.status = status;

        assert_eq!(
            entry.record_check(check(&entry, CheckKind::CheckOut, at(19, 0))),
            Err(ScheduleError::NotActive(status))
        );
        assert_eq!(entry.status, status);
        assert!(entry.check_out.is_none());
    }
}

#[test]
fn assessment_total_maps_to_complexity() {
    let scores = |values: &[u32]| -> Vec<CriterionScore> {
        values
            .iter()
            .enumerate()
            .map(|(index, score)| CriterionScore {
                criterion: format!("criterio-{index}"),
                score: *score,
            })
            .collect()
    };
    let mut assessment = Assessment {
        id: Uuid::new_v4(),
        patient_id: Uuid::new_v4(),
        kind: AssessmentKind::Nead,
        scores: scores(&[2, 3, 4, 3]),
        assessed_by: "Dra. Paula".to_string(),
        assessed_at: at(10, 0),
        notes: None,
    };

    assert_eq!(assessment.total_score(), 12);
    assert_eq!(assessment.complexity(), Complexity::Medium);

    assessment.kind = AssessmentKind::Abemid;
    assert_eq!(assessment.complexity(), Complexity::Low);

    assessment.scores = scores(&[]);
    assert_eq!(assessment.complexity(), Complexity::NotEligible);

    assessment.scores = scores(&[u32::MAX, 3]);
    assert_eq!(assessment.total_score(), u32::MAX);
    assert_eq!(assessment.complexity(), Complexity::High);
}
