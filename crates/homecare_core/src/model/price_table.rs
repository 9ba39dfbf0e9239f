//! Price table reference data.
//!
//! # Responsibility
//! - Describe read-only price tables that budgets are quoted against.
//! - Resolve table display names for list rendering.
//!
//! # Invariants
//! - Lookups never fail; an unknown table id resolves to a sentinel label.

use crate::model::money::Money;
use crate::model::service::ServiceId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type PriceTableId = Uuid;

/// Label shown when a budget references a table that is not loaded.
pub const UNKNOWN_TABLE_LABEL: &str = "N/A";

/// One priced service in a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTableItem {
    pub service_id: ServiceId,
    pub price: Money,
}

/// Named set of service prices (e.g. per health plan).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTable {
    pub id: PriceTableId,
    pub name: String,
    #[serde(default)]
    pub items: Vec<PriceTableItem>,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl PriceTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            items: Vec::new(),
            active: true,
        }
    }

    /// Adds or replaces the price of one service.
    pub fn set_price(&mut self, service_id: ServiceId, price: Money) {
        match self.items.iter_mut().find(|item| item.service_id == service_id) {
            Some(item) => item.price = price,
            None => self.items.push(PriceTableItem { service_id, price }),
        }
    }

    pub fn price_for(&self, service_id: ServiceId) -> Option<Money> {
        self.items
            .iter()
            .find(|item| item.service_id == service_id)
            .map(|item| item.price)
    }
}

/// Resolves a table name by id with a linear scan, degrading to
/// [`UNKNOWN_TABLE_LABEL`].
pub fn table_name_or_placeholder(tables: &[PriceTable], id: PriceTableId) -> &str {
    tables
        .iter()
        .find(|table| table.id == id)
        .map_or(UNKNOWN_TABLE_LABEL, |table| table.name.as_str())
}

fn default_active() -> bool {
    true
}
