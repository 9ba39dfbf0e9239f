//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `homecare_core` wiring (config, logging, audit store) outside the UI.
//! - Print the first budget page of a small fixture set.

use chrono::{NaiveDate, NaiveDateTime};
use homecare_core::db::{open_db, open_db_in_memory};
use homecare_core::{
    AuditSink, Budget, BudgetDraft, BudgetItem, BudgetItemDelta, BudgetStatus, CoreConfig,
    FinancesModule, Money, PriceTable, Role, Session, SqliteAuditSink,
};
use log::error;
use std::process::ExitCode;
use uuid::Uuid;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("event=cli_run module=cli status=error error={message}");
            eprintln!("homecare_cli: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let config = CoreConfig::from_env().map_err(|err| err.to_string())?;
    homecare_core::init_from_config(&config)?;

    let conn = match &config.audit_db_path {
        Some(path) => open_db(path),
        None => open_db_in_memory(),
    }
    .map_err(|err| err.to_string())?;
    let audit = SqliteAuditSink::new(&conn);

    println!("homecare_core version={}", homecare_core::core_version());

    let mut module = FinancesModule::new(Vec::new(), fixture_tables(), &audit)
        .with_paginator(config.paginator());
    seed_budgets(&mut module)?;

    let list = module.budget_list();
    println!("{}", list.headers().join(" | "));
    for row in list.rows() {
        println!("{}", row.cells.join(" | "));
    }
    println!(
        "page {}/{} audit_entries={}",
        list.paginator().current_page(),
        list.page_count(),
        audit.count().map_err(|err| err.to_string())?
    );
    Ok(())
}

fn fixture_tables() -> Vec<PriceTable> {
    vec![
        PriceTable::new("Tabela Particular 2025"),
        PriceTable::new("Convênio Saúde+"),
    ]
}

fn seed_budgets<A: AuditSink>(module: &mut FinancesModule<A>) -> Result<(), String> {
    let session = Session::new(Uuid::new_v4(), "Operador CLI", Role::administrator());
    let table_id = module
        .tables()
        .first()
        .map(|table| table.id)
        .ok_or("no price table loaded")?;
    let nursing = Uuid::new_v4();
    let physio = Uuid::new_v4();

    let original = Budget::original(
        BudgetDraft {
            patient_name: "Maria da Silva".to_string(),
            table_id,
            items: vec![
                BudgetItem::new(
                    nursing,
                    "Plantão técnico de enfermagem 12h",
                    30,
                    Money::from_reais(320.0),
                ),
                BudgetItem::new(physio, "Sessão de fisioterapia", 12, Money::from_reais(150.0)),
            ],
            status: BudgetStatus::Approved,
        },
        at(2025, 2, 1),
    )
    .map_err(|err| err.to_string())?;
    let original_id = module.save_budget(original, &session).id();

    module
        .create_additive(
            original_id,
            vec![BudgetItemDelta::SetQuantity {
                service_id: physio,
                quantity: 20,
            }],
            &session,
            at(2025, 3, 1),
        )
        .map_err(|err| err.to_string())?;
    Ok(())
}

fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(9, 0, 0))
        .unwrap_or_default()
}
