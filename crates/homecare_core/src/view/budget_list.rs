//! Paginated budget list projection.
//!
//! # Invariants
//! - The table name is resolved per row by linear lookup; a missing table
//!   renders the sentinel label instead of failing.
//! - Every row offers the same action set.

use crate::format::format_date;
use crate::model::budget::{Budget, BudgetId};
use crate::model::price_table::{table_name_or_placeholder, PriceTable};
use crate::pagination::Paginator;
use crate::view::table::{RenderedRow, Table};

/// Row-level actions offered by the budget list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetAction {
    /// Clone the budget into its next additive version.
    CreateAdditive,
    ViewDetails,
}

impl BudgetAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::CreateAdditive => "Clonar/Aditivo",
            Self::ViewDetails => "Ver detalhes",
        }
    }
}

pub const BUDGET_ROW_ACTIONS: &[BudgetAction] =
    &[BudgetAction::CreateAdditive, BudgetAction::ViewDetails];

/// Rendered budget row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetRow {
    pub id: BudgetId,
    pub cells: Vec<String>,
    pub actions: &'static [BudgetAction],
}

/// Budget table over a borrowed list and its price tables.
pub struct BudgetList<'a> {
    budgets: &'a [Budget],
    table: Table<'a, Budget>,
    paginator: Paginator,
}

impl<'a> BudgetList<'a> {
    pub fn new(budgets: &'a [Budget], tables: &'a [PriceTable], paginator: Paginator) -> Self {
        let table = Table::new(|budget: &Budget| budget.id().to_string())
            .column("Paciente", |budget| budget.patient_name().to_string())
            .column("Tabela", move |budget| {
                table_name_or_placeholder(tables, budget.table_id()).to_string()
            })
            .column("Versão", |budget| format!("v{}", budget.version()))
            .column("Tipo", |budget| budget.kind().label().to_string())
            .column("Valor total", |budget| budget.total_value().to_string())
            .column("Status", |budget| budget.status().label().to_string())
            .column("Criado em", |budget| format_date(budget.created_at().date()));

        Self {
            budgets,
            table,
            paginator,
        }
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.table.headers()
    }

    pub fn paginator(&self) -> Paginator {
        self.paginator
    }

    pub fn page_count(&self) -> usize {
        self.paginator.page_count(self.budgets.len())
    }

    /// Rows of the current page.
    pub fn rows(&self) -> Vec<BudgetRow> {
        self.paginator
            .page(self.budgets)
            .iter()
            .map(|budget| {
                let RenderedRow { cells, .. } = self.table.render_row(budget);
                BudgetRow {
                    id: budget.id(),
                    cells,
                    actions: BUDGET_ROW_ACTIONS,
                }
            })
            .collect()
    }
}
