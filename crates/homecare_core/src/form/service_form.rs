//! Care service catalog form binding.
//!
//! Price and cost inputs are coerced to `f64` with leading-number semantics
//! (`"12.5abc"` -> `12.5`, `"-Infinity"` -> `-inf`); input without a leading
//! number becomes `NaN` and is forwarded as-is.

use crate::form::{invalid_option, optional_text, require_text, FormError, FormField, FormModel};
use crate::model::service::{CareService, ServiceUnit};
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

static LEADING_FLOAT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("valid float regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceField {
    Name,
    Code,
    Category,
    Unit,
    Cost,
    Price,
    Description,
    Active,
}

impl FormField for ServiceField {
    const ALL: &'static [Self] = &[
        Self::Name,
        Self::Code,
        Self::Category,
        Self::Unit,
        Self::Cost,
        Self::Price,
        Self::Description,
        Self::Active,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Code => "code",
            Self::Category => "category",
            Self::Unit => "unit",
            Self::Cost => "cost",
            Self::Price => "price",
            Self::Description => "description",
            Self::Active => "active",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ServicePatch {
    Name(String),
    Code(String),
    Category(String),
    Unit(ServiceUnit),
    Cost(f64),
    Price(f64),
    Description(Option<String>),
    Active(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceFormData {
    pub name: String,
    pub code: String,
    pub category: String,
    pub unit: ServiceUnit,
    pub cost: f64,
    pub price: f64,
    pub description: Option<String>,
    pub active: bool,
}

impl Default for ServiceFormData {
    fn default() -> Self {
        Self {
            name: String::new(),
            code: String::new(),
            category: String::new(),
            unit: ServiceUnit::Visit,
            cost: 0.0,
            price: 0.0,
            description: None,
            active: true,
        }
    }
}

impl ServiceFormData {
    /// Builds a catalog entry; name and code are required. Prices are not
    /// checked.
    pub fn build(&self) -> Result<CareService, FormError> {
        Ok(CareService {
            id: Uuid::new_v4(),
            name: require_text(&self.name, ServiceField::Name.as_str())?,
            code: require_text(&self.code, ServiceField::Code.as_str())?,
            category: self.category.trim().to_string(),
            unit: self.unit,
            cost: self.cost,
            price: self.price,
            description: self.description.clone(),
            active: self.active,
        })
    }
}

impl FormModel for ServiceFormData {
    type Field = ServiceField;
    type Patch = ServicePatch;

    fn parse_input(field: ServiceField, raw: &str) -> Result<ServicePatch, FormError> {
        let name = field.as_str();
        Ok(match field {
            ServiceField::Name => ServicePatch::Name(raw.to_string()),
            ServiceField::Code => ServicePatch::Code(raw.to_string()),
            ServiceField::Category => ServicePatch::Category(raw.to_string()),
            ServiceField::Unit => ServicePatch::Unit(
                ServiceUnit::parse(raw).ok_or_else(|| invalid_option(name, raw))?,
            ),
            ServiceField::Cost => ServicePatch::Cost(parse_float_lenient(raw)),
            ServiceField::Price => ServicePatch::Price(parse_float_lenient(raw)),
            ServiceField::Description => ServicePatch::Description(optional_text(raw)),
            ServiceField::Active => ServicePatch::Active(match raw.trim() {
                "true" | "on" | "1" => true,
                "false" | "off" | "0" | "" => false,
                _ => return Err(invalid_option(name, raw)),
            }),
        })
    }

    fn apply(&mut self, patch: ServicePatch) {
        match patch {
            ServicePatch::Name(value) => self.name = value,
            ServicePatch::Code(value) => self.code = value,
            ServicePatch::Category(value) => self.category = value,
            ServicePatch::Unit(value) => self.unit = value,
            ServicePatch::Cost(value) => self.cost = value,
            ServicePatch::Price(value) => self.price = value,
            ServicePatch::Description(value) => self.description = value,
            ServicePatch::Active(value) => self.active = value,
        }
    }

    fn value(&self, field: ServiceField) -> String {
        match field {
            ServiceField::Name => self.name.clone(),
            ServiceField::Code => self.code.clone(),
            ServiceField::Category => self.category.clone(),
            ServiceField::Unit => self.unit.as_str().to_string(),
            ServiceField::Cost => self.cost.to_string(),
            ServiceField::Price => self.price.to_string(),
            ServiceField::Description => self.description.clone().unwrap_or_default(),
            ServiceField::Active => self.active.to_string(),
        }
    }
}

/// Parses the leading decimal number of `raw`, or `NaN` when there is none.
pub fn parse_float_lenient(raw: &str) -> f64 {
    LEADING_FLOAT_RE
        .find(raw.trim_start())
        .and_then(|found| found.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}
