use chrono::NaiveDate;
use homecare_core::model::patient::{Patient, PatientStatus};
use homecare_core::model::professional::{Professional, ProfessionalKind, ProfessionalStatus};
use homecare_core::{patient_detail, professional_detail, DetailError, RouteError, RouteParams};
use uuid::Uuid;

fn patient(cpf: &str, phone: &str) -> Patient {
    Patient {
        id: Uuid::new_v4(),
        name: "Maria da Silva".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1950, 6, 15).unwrap(),
        cpf: cpf.to_string(),
        phone: phone.to_string(),
        address: Some("Rua das Flores, 100".to_string()),
        health_plan: None,
        status: PatientStatus::Active,
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()
}

#[test]
fn missing_or_blank_id_is_a_route_error() {
    let patients = vec![patient("12345678901", "11987654321")];

    assert_eq!(
        patient_detail(&RouteParams::new(), &patients, today()).unwrap_err(),
        DetailError::Route(RouteError::MissingParam("id"))
    );
    assert_eq!(
        patient_detail(&RouteParams::new().with("id", "   "), &patients, today()).unwrap_err(),
        DetailError::Route(RouteError::MissingParam("id"))
    );
    assert_eq!(
        professional_detail(&RouteParams::new().with("id", "42"), &[]).unwrap_err(),
        DetailError::Route(RouteError::InvalidParam {
            name: "id",
            value: "42".to_string()
        })
    );
}

#[test]
fn unknown_id_is_not_found() {
    let missing = Uuid::new_v4();
    let params = RouteParams::new().with("id", missing.to_string());

    let err = patient_detail(&params, &[], today()).unwrap_err();
    assert_eq!(
        err,
        DetailError::NotFound {
            entity: "patient",
            id: missing
        }
    );
    assert_eq!(err.to_string(), format!("patient not found: {missing}"));
}

#[test]
fn patient_detail_formats_fields() {
    let record = patient("123.456.789-01", "(11) 98765-4321");
    let params = RouteParams::new().with("id", record.id.to_string());

    let view = patient_detail(&params, &[record.clone()], today()).unwrap();
    assert_eq!(view.id, record.id);
    assert_eq!(view.birth_date, "15/06/1950");
    assert_eq!(view.age, 74);
    assert_eq!(view.cpf, "123.456.789-01");
    assert_eq!(view.phone, "(11) 98765-4321");
    assert_eq!(view.health_plan, "Particular");
    assert_eq!(view.status, "Ativo");
}

#[test]
fn malformed_documents_are_shown_raw() {
    let record = patient("1234", "n/d");
    let params = RouteParams::new().with("id", record.id.to_string());

    let view = patient_detail(&params, &[record], today()).unwrap();
    assert_eq!(view.cpf, "1234");
    assert_eq!(view.phone, "n/d");
}

#[test]
fn professional_detail_shows_council_registration() {
    let record = Professional {
        id: Uuid::new_v4(),
        name: "Ana Lima".to_string(),
        cpf: "98765432100".to_string(),
        email: "ana@example.com".to_string(),
        phone: "1133334444".to_string(),
        kind: ProfessionalKind::Nurse,
        specialty: Some("UTI".to_string()),
        council_number: Some("123456".to_string()),
        status: ProfessionalStatus::OnLeave,
    };
    let params = RouteParams::new().with("id", record.id.to_string());

    let view = professional_detail(&params, &[record]).unwrap();
    assert_eq!(view.kind, "Enfermeiro(a)");
    assert_eq!(view.registration, "COREN 123456");
    assert_eq!(view.cpf, "987.654.321-00");
    assert_eq!(view.phone, "(11) 3333-4444");
    assert_eq!(view.status, "Afastado");
}
