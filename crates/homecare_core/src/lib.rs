//! Core domain logic for the homecare administration screens.
//! This crate is the single source of truth for business invariants.

pub mod audit;
pub mod config;
pub mod db;
pub mod form;
pub mod format;
pub mod logging;
pub mod model;
pub mod pagination;
pub mod service;
pub mod view;

pub use audit::{AuditEntry, AuditError, AuditSink, MemoryAuditSink, SqliteAuditSink};
pub use config::{ConfigError, CoreConfig};
pub use form::notification_form::{NotificationField, NotificationFormData, NotificationPatch};
pub use form::professional_form::{ProfessionalField, ProfessionalFormData, ProfessionalPatch};
pub use form::service_form::{ServiceField, ServiceFormData, ServicePatch};
pub use form::{ControlledForm, FormError, FormField, FormModel, InputView};
pub use format::{
    age_from_iso, calculate_margin, format_cpf, format_currency, format_date, format_date_time,
    format_iso_date, format_phone, get_age, FormatError,
};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use model::auth::{Action, Entity, Permission, Role, Session};
pub use model::budget::{
    Budget, BudgetChain, BudgetDraft, BudgetId, BudgetItem, BudgetItemDelta, BudgetStatus,
    BudgetType, BudgetValidationError,
};
pub use model::money::Money;
pub use model::price_table::{table_name_or_placeholder, PriceTable, PriceTableId};
pub use pagination::{PaginationError, Paginator, DEFAULT_PAGE_SIZE};
pub use service::finances::{FinancesError, FinancesModule, FinancesTab};
pub use view::budget_list::{BudgetAction, BudgetList, BudgetRow};
pub use view::detail::{
    patient_detail, professional_detail, DetailError, RouteError, RouteParams,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
