//! Budget (PAD quote) domain model.
//!
//! # Responsibility
//! - Define the budget record quoted to a homecare patient and its line items.
//! - Derive additive ("aditivo") versions from a prior version plus deltas.
//! - Check version chains that share one clinical case.
//!
//! # Invariants
//! - `version >= 1`; the type is derived: original iff `version == 1`.
//! - An original is its own case root and has no parent; an additive points at
//!   the version it amends and shares its `case_id`.
//! - When line items are present, `total_value` equals the sum of line totals.
//! - Line items are keyed by `service_id`; duplicates and zero quantities are
//!   rejected.

use crate::model::money::Money;
use crate::model::price_table::PriceTableId;
use crate::model::service::ServiceId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type BudgetId = Uuid;

/// Budget kind, derived from the version number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetType {
    /// First quote of a clinical case (`version == 1`).
    Original,
    /// Amendment of a previous version (`version > 1`).
    Additive,
}

impl BudgetType {
    pub fn for_version(version: u32) -> Self {
        if version == 1 {
            Self::Original
        } else {
            Self::Additive
        }
    }

    /// pt-BR label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Original => "Original",
            Self::Additive => "Aditivo",
        }
    }
}

/// Approval lifecycle of a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl BudgetStatus {
    /// pt-BR label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Draft => "Rascunho",
            Self::Pending => "Pendente",
            Self::Approved => "Aprovado",
            Self::Rejected => "Rejeitado",
            Self::Cancelled => "Cancelado",
        }
    }
}

/// One quoted service line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetItem {
    pub service_id: ServiceId,
    pub description: String,
    pub quantity: u32,
    pub unit_price: Money,
}

impl BudgetItem {
    pub fn new(
        service_id: ServiceId,
        description: impl Into<String>,
        quantity: u32,
        unit_price: Money,
    ) -> Self {
        Self {
            service_id,
            description: description.into(),
            quantity,
            unit_price,
        }
    }

    /// Line total, `None` on overflow.
    pub fn total(&self) -> Option<Money> {
        self.unit_price.checked_mul(self.quantity)
    }
}

/// Change applied to the prior version's items when deriving an additive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetItemDelta {
    Add(BudgetItem),
    SetQuantity { service_id: ServiceId, quantity: u32 },
    SetUnitPrice { service_id: ServiceId, unit_price: Money },
    Remove { service_id: ServiceId },
}

/// Input produced by the budget builder for a new original budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetDraft {
    pub patient_name: String,
    pub table_id: PriceTableId,
    pub items: Vec<BudgetItem>,
    pub status: BudgetStatus,
}

/// Budget invariant violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NilId,
    BlankPatientName,
    ZeroVersion,
    VersionOverflow,
    TypeVersionMismatch { kind: BudgetType, version: u32 },
    OriginalWithParent(BudgetId),
    OriginalNotCaseRoot(BudgetId),
    AdditiveWithoutParent(BudgetId),
    MissingCaseId(BudgetId),
    DuplicateItem(ServiceId),
    ZeroQuantity(ServiceId),
    ItemNotFound(ServiceId),
    TotalMismatch { expected: Money, actual: Money },
    AmountOverflow,
    EmptyChain,
    ChainVersionGap { expected: u32, actual: u32 },
    ChainBrokenLink(BudgetId),
}

impl Display for BudgetValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "budget id must not be nil"),
            Self::BlankPatientName => write!(f, "budget patient name must not be blank"),
            Self::ZeroVersion => write!(f, "budget version must be >= 1"),
            Self::VersionOverflow => write!(f, "budget version overflow"),
            Self::TypeVersionMismatch { kind, version } => write!(
                f,
                "budget type `{}` does not match version {version}",
                kind.label()
            ),
            Self::OriginalWithParent(id) => {
                write!(f, "original budget {id} must not reference a parent")
            }
            Self::OriginalNotCaseRoot(id) => {
                write!(f, "original budget {id} must be its own case root")
            }
            Self::AdditiveWithoutParent(id) => {
                write!(f, "additive budget {id} must reference a parent")
            }
            Self::MissingCaseId(id) => {
                write!(f, "additive budget {id} must reference its case")
            }
            Self::DuplicateItem(id) => write!(f, "duplicate budget item for service {id}"),
            Self::ZeroQuantity(id) => write!(f, "budget item quantity must be > 0: {id}"),
            Self::ItemNotFound(id) => write!(f, "budget item not found for service {id}"),
            Self::TotalMismatch { expected, actual } => write!(
                f,
                "budget total {actual} does not match item sum {expected}"
            ),
            Self::AmountOverflow => write!(f, "budget amount exceeds the supported range"),
            Self::EmptyChain => write!(f, "budget chain is empty"),
            Self::ChainVersionGap { expected, actual } => write!(
                f,
                "budget chain expected version {expected}, found {actual}"
            ),
            Self::ChainBrokenLink(id) => {
                write!(f, "budget {id} does not reference the previous version")
            }
        }
    }
}

impl Error for BudgetValidationError {}

/// Quote issued for a patient's homecare plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BudgetRecord", into = "BudgetRecord")]
pub struct Budget {
    id: BudgetId,
    case_id: BudgetId,
    parent_id: Option<BudgetId>,
    patient_name: String,
    table_id: PriceTableId,
    version: u32,
    items: Vec<BudgetItem>,
    total_value: Money,
    status: BudgetStatus,
    created_at: NaiveDateTime,
}

impl Budget {
    /// Creates version 1 of a new clinical case.
    pub fn original(
        draft: BudgetDraft,
        created_at: NaiveDateTime,
    ) -> Result<Self, BudgetValidationError> {
        let id = Uuid::new_v4();
        let total_value = sum_items(&draft.items)?;
        let budget = Self {
            id,
            case_id: id,
            parent_id: None,
            patient_name: draft.patient_name,
            table_id: draft.table_id,
            version: 1,
            items: draft.items,
            total_value,
            status: draft.status,
            created_at,
        };
        budget.validate()?;
        Ok(budget)
    }

    /// Derives the next version from `prior`: its items with `deltas` applied.
    ///
    /// The additive starts as a draft and keeps the prior table and patient.
    pub fn additive(
        prior: &Budget,
        deltas: impl IntoIterator<Item = BudgetItemDelta>,
        created_at: NaiveDateTime,
    ) -> Result<Self, BudgetValidationError> {
        let version = prior
            .version
            .checked_add(1)
            .ok_or(BudgetValidationError::VersionOverflow)?;

        let mut items = prior.items.clone();
        for delta in deltas {
            apply_delta(&mut items, delta)?;
        }

        let budget = Self {
            id: Uuid::new_v4(),
            case_id: prior.case_id,
            parent_id: Some(prior.id),
            patient_name: prior.patient_name.clone(),
            table_id: prior.table_id,
            version,
            total_value: sum_items(&items)?,
            items,
            status: BudgetStatus::Draft,
            created_at,
        };
        budget.validate()?;
        Ok(budget)
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.id.is_nil() || self.case_id.is_nil() {
            return Err(BudgetValidationError::NilId);
        }
        if self.version == 0 {
            return Err(BudgetValidationError::ZeroVersion);
        }
        if self.patient_name.trim().is_empty() {
            return Err(BudgetValidationError::BlankPatientName);
        }

        match (self.kind(), self.parent_id) {
            (BudgetType::Original, Some(_)) => {
                return Err(BudgetValidationError::OriginalWithParent(self.id));
            }
            (BudgetType::Original, None) if self.case_id != self.id => {
                return Err(BudgetValidationError::OriginalNotCaseRoot(self.id));
            }
            (BudgetType::Additive, None) => {
                return Err(BudgetValidationError::AdditiveWithoutParent(self.id));
            }
            _ => {}
        }

        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            if !seen.insert(item.service_id) {
                return Err(BudgetValidationError::DuplicateItem(item.service_id));
            }
            if item.quantity == 0 {
                return Err(BudgetValidationError::ZeroQuantity(item.service_id));
            }
        }

        if !self.items.is_empty() {
            let expected = sum_items(&self.items)?;
            if expected != self.total_value {
                return Err(BudgetValidationError::TotalMismatch {
                    expected,
                    actual: self.total_value,
                });
            }
        }

        Ok(())
    }

    pub fn id(&self) -> BudgetId {
        self.id
    }

    /// Id of the original budget that starts this clinical case.
    pub fn case_id(&self) -> BudgetId {
        self.case_id
    }

    pub fn parent_id(&self) -> Option<BudgetId> {
        self.parent_id
    }

    pub fn patient_name(&self) -> &str {
        &self.patient_name
    }

    pub fn table_id(&self) -> PriceTableId {
        self.table_id
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn kind(&self) -> BudgetType {
        BudgetType::for_version(self.version)
    }

    pub fn items(&self) -> &[BudgetItem] {
        &self.items
    }

    pub fn total_value(&self) -> Money {
        self.total_value
    }

    pub fn status(&self) -> BudgetStatus {
        self.status
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }
}

/// Versions of one clinical case, ordered by version.
#[derive(Debug, Clone)]
pub struct BudgetChain<'a> {
    case_id: BudgetId,
    budgets: Vec<&'a Budget>,
}

impl<'a> BudgetChain<'a> {
    /// Collects every budget of `case_id` from an unordered list.
    pub fn collect(budgets: &'a [Budget], case_id: BudgetId) -> Self {
        let mut chain: Vec<&Budget> = budgets
            .iter()
            .filter(|budget| budget.case_id == case_id)
            .collect();
        chain.sort_by_key(|budget| budget.version);
        Self {
            case_id,
            budgets: chain,
        }
    }

    pub fn case_id(&self) -> BudgetId {
        self.case_id
    }

    pub fn len(&self) -> usize {
        self.budgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }

    pub fn versions(&self) -> impl Iterator<Item = &'a Budget> + '_ {
        self.budgets.iter().copied()
    }

    pub fn latest(&self) -> Option<&'a Budget> {
        self.budgets.last().copied()
    }

    /// Version number the next additive of this case will receive.
    pub fn next_version(&self) -> u32 {
        self.latest().map_or(1, |budget| budget.version.saturating_add(1))
    }

    /// Total change between the original and the latest version; zero for
    /// an empty chain.
    pub fn total_change(&self) -> Result<Money, BudgetValidationError> {
        match (self.budgets.first(), self.budgets.last()) {
            (Some(first), Some(last)) => last
                .total_value
                .checked_sub(first.total_value)
                .ok_or(BudgetValidationError::AmountOverflow),
            _ => Ok(Money::ZERO),
        }
    }

    /// Checks that versions run 1..=n without gaps and each additive points
    /// at the previous version.
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.budgets.is_empty() {
            return Err(BudgetValidationError::EmptyChain);
        }

        let mut previous: Option<&Budget> = None;
        for (index, budget) in self.budgets.iter().enumerate() {
            let expected = index as u32 + 1;
            if budget.version != expected {
                return Err(BudgetValidationError::ChainVersionGap {
                    expected,
                    actual: budget.version,
                });
            }
            if let Some(prev) = previous {
                if budget.parent_id != Some(prev.id) {
                    return Err(BudgetValidationError::ChainBrokenLink(budget.id));
                }
            }
            previous = Some(budget);
        }

        Ok(())
    }
}

/// External record shape (`camelCase`, explicit `type`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BudgetRecord {
    id: BudgetId,
    #[serde(default)]
    case_id: Option<BudgetId>,
    #[serde(default)]
    parent_id: Option<BudgetId>,
    patient_name: String,
    table_id: PriceTableId,
    version: u32,
    #[serde(rename = "type")]
    kind: BudgetType,
    total_value: Money,
    status: BudgetStatus,
    created_at: NaiveDateTime,
    #[serde(default)]
    items: Vec<BudgetItem>,
}

impl TryFrom<BudgetRecord> for Budget {
    type Error = BudgetValidationError;

    fn try_from(record: BudgetRecord) -> Result<Self, Self::Error> {
        if record.version == 0 {
            return Err(BudgetValidationError::ZeroVersion);
        }
        if record.kind != BudgetType::for_version(record.version) {
            return Err(BudgetValidationError::TypeVersionMismatch {
                kind: record.kind,
                version: record.version,
            });
        }

        let case_id = match (record.case_id, record.kind) {
            (Some(case_id), _) => case_id,
            (None, BudgetType::Original) => record.id,
            (None, BudgetType::Additive) => {
                return Err(BudgetValidationError::MissingCaseId(record.id))
            }
        };

        let budget = Self {
            id: record.id,
            case_id,
            parent_id: record.parent_id,
            patient_name: record.patient_name,
            table_id: record.table_id,
            version: record.version,
            items: record.items,
            total_value: record.total_value,
            status: record.status,
            created_at: record.created_at,
        };
        budget.validate()?;
        Ok(budget)
    }
}

impl From<Budget> for BudgetRecord {
    fn from(budget: Budget) -> Self {
        Self {
            kind: budget.kind(),
            id: budget.id,
            case_id: Some(budget.case_id),
            parent_id: budget.parent_id,
            patient_name: budget.patient_name,
            table_id: budget.table_id,
            version: budget.version,
            total_value: budget.total_value,
            status: budget.status,
            created_at: budget.created_at,
            items: budget.items,
        }
    }
}

fn sum_items(items: &[BudgetItem]) -> Result<Money, BudgetValidationError> {
    items
        .iter()
        .try_fold(Money::ZERO, |total, item| {
            item.total().and_then(|line| total.checked_add(line))
        })
        .ok_or(BudgetValidationError::AmountOverflow)
}

fn apply_delta(
    items: &mut Vec<BudgetItem>,
    delta: BudgetItemDelta,
) -> Result<(), BudgetValidationError> {
    match delta {
        BudgetItemDelta::Add(item) => {
            if items.iter().any(|existing| existing.service_id == item.service_id) {
                return Err(BudgetValidationError::DuplicateItem(item.service_id));
            }
            items.push(item);
        }
        BudgetItemDelta::SetQuantity {
            service_id,
            quantity,
        } => {
            if quantity == 0 {
                return Err(BudgetValidationError::ZeroQuantity(service_id));
            }
            find_item(items, service_id)?.quantity = quantity;
        }
        BudgetItemDelta::SetUnitPrice {
            service_id,
            unit_price,
        } => {
            find_item(items, service_id)?.unit_price = unit_price;
        }
        BudgetItemDelta::Remove { service_id } => {
            let index = items
                .iter()
                .position(|item| item.service_id == service_id)
                .ok_or(BudgetValidationError::ItemNotFound(service_id))?;
            items.remove(index);
        }
    }
    Ok(())
}

fn find_item(
    items: &mut [BudgetItem],
    service_id: ServiceId,
) -> Result<&mut BudgetItem, BudgetValidationError> {
    items
        .iter_mut()
        .find(|item| item.service_id == service_id)
        .ok_or(BudgetValidationError::ItemNotFound(service_id))
}
