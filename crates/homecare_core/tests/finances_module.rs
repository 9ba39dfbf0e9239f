use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use homecare_core::{
    Action, AuditEntry, AuditError, AuditSink, Budget, BudgetAction, BudgetDraft, BudgetItem,
    BudgetItemDelta, BudgetStatus, Entity, FinancesError, FinancesModule, FinancesTab,
    MemoryAuditSink, Money, PriceTable, Role, Session,
};
use uuid::Uuid;

fn at(month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, month, day)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

fn session() -> Session {
    let mut role = Role::new("finance", "Financeiro");
    role.grant(Action::Create, Entity::Budget);
    Session::new(Uuid::new_v4(), "Carla Souza", role)
}

fn budget(patient: &str, table: &PriceTable, day: u32) -> Budget {
    Budget::original(
        BudgetDraft {
            patient_name: patient.to_string(),
            table_id: table.id,
            items: vec![BudgetItem::new(
                Uuid::new_v4(),
                "Visita de enfermagem",
                4,
                Money::from_reais(250.0),
            )],
            status: BudgetStatus::Pending,
        },
        at(1, day),
    )
    .unwrap()
}

struct FailingSink;

impl AuditSink for FailingSink {
    fn record(&self, _entry: &AuditEntry) -> Result<(), AuditError> {
        Err(AuditError::Unavailable("offline".to_string()))
    }
}

#[test]
fn save_prepends_and_keeps_previous_list_unchanged() {
    let table = PriceTable::new("Particular");
    let existing = vec![budget("A", &table, 1), budget("B", &table, 2)];
    let mut module = FinancesModule::new(existing.clone(), vec![table.clone()], MemoryAuditSink::new());

    let new_budget = budget("C", &table, 3);
    let saved_id = module.save_budget(new_budget.clone(), &session()).id();

    assert_eq!(saved_id, new_budget.id());
    assert_eq!(module.budgets()[0], new_budget);
    assert_eq!(&module.budgets()[1..], existing.as_slice());
}

#[test]
fn save_keeps_prior_order_for_any_list_length() {
    let table = PriceTable::new("Particular");
    let session = session();

    for len in [0_usize, 1, 15, 16, 31] {
        let prior: Vec<Budget> = (0..len)
            .map(|index| budget(&format!("Paciente {index}"), &table, 1 + (index % 28) as u32))
            .collect();
        let mut module =
            FinancesModule::new(prior.clone(), vec![table.clone()], MemoryAuditSink::new());
        let last_page = module.budget_list().page_count().max(1);
        module.go_to_page(last_page);

        let new_budget = budget("Novo paciente", &table, 28);
        module.save_budget(new_budget.clone(), &session);

        assert_eq!(module.budgets().len(), len + 1, "len={len}");
        assert_eq!(module.budgets()[0], new_budget, "len={len}");
        assert_eq!(&module.budgets()[1..], prior.as_slice(), "len={len}");

        module.go_to_page(1);
        let rows = module.current_rows();
        assert_eq!(rows[0].id, new_budget.id(), "len={len}");
        assert_eq!(rows[0].cells[0], "Novo paciente", "len={len}");
        assert_eq!(rows.len(), (len + 1).min(15), "len={len}");
    }
}

#[test]
fn save_audits_as_the_session_user() {
    let table = PriceTable::new("Particular");
    let mut module = FinancesModule::new(Vec::new(), vec![table.clone()], MemoryAuditSink::new());
    let session = session();
    let recorded_at = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();

    let new_budget = budget("Maria da Silva", &table, 5);
    module.save_budget_at(new_budget.clone(), &session, recorded_at);

    let entries = module.audit().entries();
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.user_id, session.user_id);
    assert_eq!(entry.user_name, "Carla Souza");
    assert_eq!(entry.user_role, "finance");
    assert_eq!(entry.action, Action::Create);
    assert_eq!(entry.entity, Entity::Budget);
    assert_eq!(entry.entity_id, new_budget.id().to_string());
    assert_eq!(entry.recorded_at, recorded_at);
    assert!(entry.description.contains("Maria da Silva"));
}

#[test]
fn audit_failure_does_not_undo_the_save() {
    let table = PriceTable::new("Particular");
    let mut module = FinancesModule::new(Vec::new(), vec![table.clone()], FailingSink);

    module.save_budget(budget("A", &table, 1), &session());
    assert_eq!(module.budgets().len(), 1);
}

#[test]
fn create_additive_clones_the_latest_version_of_the_case() {
    let table = PriceTable::new("Convênio");
    let mut module = FinancesModule::new(Vec::new(), vec![table.clone()], MemoryAuditSink::new());
    let session = session();

    let original = budget("Maria", &table, 1);
    let service_id = original.items()[0].service_id;
    let original_id = module.save_budget(original, &session).id();
    module.save_budget(budget("Outro paciente", &table, 2), &session);

    let second_id = module
        .create_additive(
            original_id,
            vec![BudgetItemDelta::SetQuantity {
                service_id,
                quantity: 8,
            }],
            &session,
            at(2, 1),
        )
        .unwrap()
        .id();

    // Cloning from the original again still chains after version 2.
    let third = module
        .create_additive(original_id, Vec::new(), &session, at(3, 1))
        .unwrap();
    assert_eq!(third.version(), 3);
    assert_eq!(third.parent_id(), Some(second_id));
    assert_eq!(third.total_value(), Money::from_reais(2_000.0));

    let chain = module.budget_chain(original_id);
    assert_eq!(chain.len(), 3);
    assert_eq!(chain.validate(), Ok(()));
    assert_eq!(module.budgets().len(), 4);
    assert_eq!(module.audit().len(), 4);
}

#[test]
fn create_additive_for_unknown_budget_fails() {
    let mut module = FinancesModule::new(Vec::new(), Vec::new(), MemoryAuditSink::new());
    let missing = Uuid::new_v4();

    let err = module
        .create_additive(missing, Vec::new(), &session(), at(1, 1))
        .unwrap_err();
    assert!(matches!(err, FinancesError::BudgetNotFound(id) if id == missing));
}

#[test]
fn budget_rows_resolve_table_names_and_paginate() {
    let table = PriceTable::new("Tabela Particular 2025");
    let orphan_table = PriceTable::new("Removida");
    let mut module = FinancesModule::new(Vec::new(), vec![table.clone()], MemoryAuditSink::new());
    let session = session();

    module.save_budget(budget("Sem tabela", &orphan_table, 1), &session);
    for day in 2..=17 {
        module.save_budget(budget(&format!("Paciente {day}"), &table, day), &session);
    }

    let list = module.budget_list();
    assert_eq!(
        list.headers(),
        vec![
            "Paciente",
            "Tabela",
            "Versão",
            "Tipo",
            "Valor total",
            "Status",
            "Criado em"
        ]
    );
    assert_eq!(list.page_count(), 2);
    drop(list);

    let rows = module.current_rows();
    assert_eq!(rows.len(), 15);
    assert_eq!(
        rows[0].cells,
        vec![
            "Paciente 17".to_string(),
            "Tabela Particular 2025".to_string(),
            "v1".to_string(),
            "Original".to_string(),
            "R$ 1.000,00".to_string(),
            "Pendente".to_string(),
            "17/01/2025".to_string(),
        ]
    );
    assert_eq!(
        rows[0].actions,
        &[BudgetAction::CreateAdditive, BudgetAction::ViewDetails]
    );

    assert_eq!(module.go_to_page(2), 2);
    let rows = module.current_rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].cells[1], "N/A");

    module.set_page_size(50).unwrap();
    assert_eq!(module.paginator().current_page(), 1);
    assert_eq!(module.current_rows().len(), 17);
    assert!(matches!(
        module.set_page_size(0),
        Err(FinancesError::Pagination(_))
    ));
}

#[test]
fn only_budget_tab_is_wired() {
    let mut module = FinancesModule::new(Vec::new(), Vec::new(), MemoryAuditSink::new());
    assert_eq!(module.active_tab(), FinancesTab::Budgets);
    module.select_tab(FinancesTab::Budgets);
    assert_eq!(module.active_tab().label(), "Orçamentos");
    assert_eq!(FinancesTab::ALL, &[FinancesTab::Budgets]);
}
