use chrono::NaiveDate;
use homecare_core::model::notification::{
    NotificationAudience, NotificationKind, NotificationPriority,
};
use homecare_core::model::professional::{ProfessionalKind, ProfessionalStatus};
use homecare_core::model::service::ServiceUnit;
use homecare_core::{
    ControlledForm, FormError, FormModel, InputView, NotificationField, NotificationFormData,
    NotificationPatch, ProfessionalField, ProfessionalFormData, ProfessionalPatch, ServiceField,
    ServiceFormData, ServicePatch,
};

#[test]
fn controlled_form_forwards_every_change_to_the_owner() {
    let mut data = ProfessionalFormData::default();
    {
        let mut form = ControlledForm::<ProfessionalFormData, _>::new(|patch: &ProfessionalPatch| {
            data.apply(patch.clone())
        });
        form.change(ProfessionalField::Name, "Ana Lima").unwrap();
        form.change_named("type", "nurse").unwrap();
        form.change_named("councilNumber", " 123456 ").unwrap();
        form.change_named("status", "on_leave").unwrap();
    }

    assert_eq!(data.name, "Ana Lima");
    assert_eq!(data.kind, Some(ProfessionalKind::Nurse));
    assert_eq!(data.council_number.as_deref(), Some("123456"));
    assert_eq!(data.status, ProfessionalStatus::OnLeave);
}

#[test]
fn unknown_field_and_invalid_option_are_rejected_without_forwarding() {
    let mut forwarded = Vec::new();
    let mut form = ControlledForm::<ProfessionalFormData, _>::new(|patch: &ProfessionalPatch| {
        forwarded.push(patch.clone())
    });

    assert_eq!(
        form.change_named("nickname", "Aninha"),
        Err(FormError::UnknownField("nickname".to_string()))
    );
    assert_eq!(
        form.change(ProfessionalField::Kind, "astronaut"),
        Err(FormError::InvalidOption {
            field: "type",
            value: "astronaut".to_string()
        })
    );
    form.change(ProfessionalField::Kind, "  ").unwrap();
    drop(form);

    assert_eq!(forwarded, vec![ProfessionalPatch::Kind(None)]);
}

#[test]
fn render_lists_fields_in_declaration_order() {
    let mut data = NotificationFormData::default();
    data.on_input(NotificationField::Title, "Plantão extra").unwrap();
    data.on_input(NotificationField::Audience, "role:nurse").unwrap();
    data.on_input(NotificationField::ScheduledFor, "2025-04-01T07:30")
        .unwrap();

    let form = ControlledForm::<NotificationFormData, _>::new(|_: &NotificationPatch| {});
    let inputs = form.render(&data);

    let names: Vec<&str> = inputs.iter().map(|input| input.name).collect();
    assert_eq!(
        names,
        vec!["title", "message", "type", "priority", "audience", "scheduledFor"]
    );
    assert_eq!(
        inputs[0],
        InputView {
            name: "title",
            value: "Plantão extra".to_string()
        }
    );
    assert_eq!(inputs[4].value, "role:nurse");
    assert_eq!(inputs[5].value, "2025-04-01T07:30");
}

#[test]
fn notification_form_builds_unread_notification() {
    let mut data = NotificationFormData::default();
    assert_eq!(
        data.build().unwrap_err(),
        FormError::MissingField("title")
    );

    data.on_input(NotificationField::Title, "Reunião").unwrap();
    data.on_input(NotificationField::Message, "Equipe às 14h").unwrap();
    data.on_input(NotificationField::Kind, "alert").unwrap();
    data.on_input(NotificationField::Priority, "high").unwrap();
    data.on_input(NotificationField::ScheduledFor, "2025-04-01T14:00")
        .unwrap();
    assert!(matches!(
        data.on_input(NotificationField::ScheduledFor, "amanhã"),
        Err(FormError::InvalidOption { field: "scheduledFor", .. })
    ));

    let notification = data.build().unwrap();
    assert_eq!(notification.kind, NotificationKind::Alert);
    assert_eq!(notification.priority, NotificationPriority::High);
    assert_eq!(notification.audience, NotificationAudience::Everyone);
    assert_eq!(
        notification.scheduled_for,
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap().and_hms_opt(14, 0, 0)
    );
    assert!(!notification.read);
}

#[test]
fn service_form_coerces_prices_leniently() {
    let mut data = ServiceFormData::default();
    assert_eq!(data.unit, ServiceUnit::Visit);
    assert!(data.active);

    assert_eq!(
        data.on_input(ServiceField::Price, "180.5 reais").unwrap(),
        ServicePatch::Price(180.5)
    );
    data.on_input(ServiceField::Cost, "abc").unwrap();
    assert!(data.cost.is_nan());
    data.on_input(ServiceField::Unit, "hour").unwrap();
    data.on_input(ServiceField::Active, "off").unwrap();
    assert!(matches!(
        data.on_input(ServiceField::Unit, "week"),
        Err(FormError::InvalidOption { field: "unit", .. })
    ));

    assert_eq!(data.build().unwrap_err(), FormError::MissingField("name"));
    data.on_input(ServiceField::Name, "Curativo complexo").unwrap();
    data.on_input(ServiceField::Code, "CUR-02").unwrap();

    let service = data.build().unwrap();
    assert_eq!(service.unit, ServiceUnit::Hour);
    assert_eq!(service.price, 180.5);
    assert!(service.cost.is_nan());
    assert!(!service.active);
}

#[test]
fn professional_form_requires_kind() {
    let mut data = ProfessionalFormData::default();
    data.on_input(ProfessionalField::Name, "João Pereira").unwrap();
    data.on_input(ProfessionalField::Cpf, "12345678901").unwrap();
    assert_eq!(data.build().unwrap_err(), FormError::MissingField("type"));

    data.on_input(ProfessionalField::Kind, "physiotherapist").unwrap();
    let professional = data.build().unwrap();
    assert_eq!(professional.kind, ProfessionalKind::Physiotherapist);
    assert_eq!(professional.status, ProfessionalStatus::Active);

    let reloaded = ProfessionalFormData::from_professional(&professional);
    assert_eq!(reloaded.value(ProfessionalField::Kind), "physiotherapist");
}
