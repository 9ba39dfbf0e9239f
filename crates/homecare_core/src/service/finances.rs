//! Finances screen use-cases.
//!
//! # Responsibility
//! - Own the in-memory budget list and price tables of the finances screen.
//! - Save new budgets and derive additive versions.
//! - Record an audit entry for every save, attributed to the session user.
//!
//! # Invariants
//! - A saved budget becomes the head of the list; the remaining budgets keep
//!   their order and content.
//! - Audit recording is best-effort: failures are logged and never undo a
//!   save.
//! - Only the `Budgets` tab is wired.

use crate::audit::{AuditEntry, AuditSink};
use crate::model::auth::{Action, Entity, Session};
use crate::model::budget::{
    Budget, BudgetChain, BudgetId, BudgetItemDelta, BudgetValidationError,
};
use crate::model::price_table::PriceTable;
use crate::pagination::{PaginationError, Paginator};
use crate::view::budget_list::{BudgetList, BudgetRow};
use chrono::{DateTime, NaiveDateTime, Utc};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Tabs of the finances screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FinancesTab {
    #[default]
    Budgets,
}

impl FinancesTab {
    pub const ALL: &'static [FinancesTab] = &[FinancesTab::Budgets];

    pub fn label(self) -> &'static str {
        match self {
            Self::Budgets => "Orçamentos",
        }
    }
}

#[derive(Debug)]
pub enum FinancesError {
    BudgetNotFound(BudgetId),
    Budget(BudgetValidationError),
    Pagination(PaginationError),
}

impl Display for FinancesError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BudgetNotFound(id) => write!(f, "budget not found: {id}"),
            Self::Budget(err) => write!(f, "{err}"),
            Self::Pagination(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FinancesError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::BudgetNotFound(_) => None,
            Self::Budget(err) => Some(err),
            Self::Pagination(err) => Some(err),
        }
    }
}

impl From<BudgetValidationError> for FinancesError {
    fn from(value: BudgetValidationError) -> Self {
        Self::Budget(value)
    }
}

impl From<PaginationError> for FinancesError {
    fn from(value: PaginationError) -> Self {
        Self::Pagination(value)
    }
}

/// Finances screen state.
pub struct FinancesModule<A: AuditSink> {
    active_tab: FinancesTab,
    budgets: Vec<Budget>,
    tables: Vec<PriceTable>,
    paginator: Paginator,
    audit: A,
}

impl<A: AuditSink> FinancesModule<A> {
    pub fn new(budgets: Vec<Budget>, tables: Vec<PriceTable>, audit: A) -> Self {
        Self {
            active_tab: FinancesTab::Budgets,
            budgets,
            tables,
            paginator: Paginator::default(),
            audit,
        }
    }

    pub fn with_paginator(mut self, paginator: Paginator) -> Self {
        self.paginator = paginator;
        self
    }

    pub fn active_tab(&self) -> FinancesTab {
        self.active_tab
    }

    pub fn select_tab(&mut self, tab: FinancesTab) {
        self.active_tab = tab;
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn tables(&self) -> &[PriceTable] {
        &self.tables
    }

    pub fn audit(&self) -> &A {
        &self.audit
    }

    pub fn find_budget(&self, id: BudgetId) -> Option<&Budget> {
        self.budgets.iter().find(|budget| budget.id() == id)
    }

    /// Saves a budget at the head of the list and audits it as the session
    /// user.
    pub fn save_budget(&mut self, budget: Budget, session: &Session) -> &Budget {
        self.save_budget_at(budget, session, Utc::now())
    }

    /// [`Self::save_budget`] with an explicit audit timestamp.
    pub fn save_budget_at(
        &mut self,
        budget: Budget,
        session: &Session,
        recorded_at: DateTime<Utc>,
    ) -> &Budget {
        let entry = AuditEntry::from_session(
            session,
            Action::Create,
            Entity::Budget,
            budget.id().to_string(),
            format!(
                "Orçamento v{} ({}) criado para {}",
                budget.version(),
                budget.kind().label(),
                budget.patient_name()
            ),
            recorded_at,
        );

        info!(
            "event=budget_save module=finances status=ok budget_id={} version={} items={}",
            budget.id(),
            budget.version(),
            budget.items().len()
        );
        self.budgets.insert(0, budget);

        if let Err(err) = self.audit.record(&entry) {
            warn!(
                "event=audit_record module=finances status=error entity=budget entity_id={} error_code=audit_failed error={}",
                entry.entity_id, err
            );
        }

        &self.budgets[0]
    }

    /// Clones the latest version of `budget_id`'s case into its next additive
    /// with `deltas` applied, and saves it.
    pub fn create_additive(
        &mut self,
        budget_id: BudgetId,
        deltas: Vec<BudgetItemDelta>,
        session: &Session,
        created_at: NaiveDateTime,
    ) -> Result<&Budget, FinancesError> {
        let case_id = self
            .find_budget(budget_id)
            .map(Budget::case_id)
            .ok_or(FinancesError::BudgetNotFound(budget_id))?;

        let chain = BudgetChain::collect(&self.budgets, case_id);
        let latest = chain
            .latest()
            .ok_or(FinancesError::BudgetNotFound(budget_id))?;
        let additive = Budget::additive(latest, deltas, created_at)?;

        Ok(self.save_budget(additive, session))
    }

    /// Every version of one clinical case, ordered by version.
    pub fn budget_chain(&self, case_id: BudgetId) -> BudgetChain<'_> {
        BudgetChain::collect(&self.budgets, case_id)
    }

    pub fn budget_list(&self) -> BudgetList<'_> {
        BudgetList::new(&self.budgets, &self.tables, self.paginator)
    }

    /// Rows of the current budget page.
    pub fn current_rows(&self) -> Vec<BudgetRow> {
        self.budget_list().rows()
    }

    pub fn paginator(&self) -> Paginator {
        self.paginator
    }

    pub fn go_to_page(&mut self, page: usize) -> usize {
        self.paginator.go_to(page, self.budgets.len())
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), FinancesError> {
        self.paginator.set_page_size(page_size)?;
        Ok(())
    }
}
