//! Typed administrative form bindings.
//!
//! # Responsibility
//! - Turn raw `(field, value)` input events into typed per-entity patches.
//! - Forward every patch to the caller-owned change handler.
//! - Render a field bag back into input values.
//!
//! # Invariants
//! - Field keys are closed enums; unknown names are rejected at the boundary.
//! - Forms do not validate content on input; only option-typed fields reject
//!   values outside their option set.
//! - Forms hold no state of their own; the caller owns the field bag.

use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::marker::PhantomData;

pub mod notification_form;
pub mod professional_form;
pub mod service_form;

/// Form binding errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Input event names a field the form does not have.
    UnknownField(String),
    /// Value is outside the option set of a select-like field.
    InvalidOption { field: &'static str, value: String },
    /// Required field is blank when building the record.
    MissingField(&'static str),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownField(name) => write!(f, "unknown form field: `{name}`"),
            Self::InvalidOption { field, value } => {
                write!(f, "invalid option `{value}` for field `{field}`")
            }
            Self::MissingField(field) => write!(f, "required field is blank: `{field}`"),
        }
    }
}

impl Error for FormError {}

/// Closed set of field keys for one form.
pub trait FormField: Copy + Eq + Debug + 'static {
    const ALL: &'static [Self];

    /// Stable external field name.
    fn as_str(self) -> &'static str;

    fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == name.trim())
    }
}

/// Field bag of one entity form.
pub trait FormModel: Default {
    type Field: FormField;
    type Patch: Clone + Debug + PartialEq;

    /// Converts a raw input value for `field` into a typed patch.
    fn parse_input(field: Self::Field, raw: &str) -> Result<Self::Patch, FormError>;

    /// Applies one patch to the field bag.
    fn apply(&mut self, patch: Self::Patch);

    /// Current value of `field` as input text.
    fn value(&self, field: Self::Field) -> String;

    /// Parses and applies one input event, returning the applied patch.
    fn on_input(&mut self, field: Self::Field, raw: &str) -> Result<Self::Patch, FormError> {
        let patch = Self::parse_input(field, raw)?;
        self.apply(patch.clone());
        Ok(patch)
    }
}

/// One rendered controlled input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputView {
    pub name: &'static str,
    pub value: String,
}

/// Stateless form panel: renders a caller-owned field bag and forwards each
/// change to `on_change`.
pub struct ControlledForm<M, H>
where
    M: FormModel,
    H: FnMut(&M::Patch),
{
    on_change: H,
    _model: PhantomData<fn() -> M>,
}

impl<M, H> ControlledForm<M, H>
where
    M: FormModel,
    H: FnMut(&M::Patch),
{
    pub fn new(on_change: H) -> Self {
        Self {
            on_change,
            _model: PhantomData,
        }
    }

    /// Renders every field of `data` in declaration order.
    pub fn render(&self, data: &M) -> Vec<InputView> {
        <M::Field as FormField>::ALL
            .iter()
            .map(|field| InputView {
                name: field.as_str(),
                value: data.value(*field),
            })
            .collect()
    }

    /// Handles an input event with a typed field key.
    pub fn change(&mut self, field: M::Field, raw: &str) -> Result<(), FormError> {
        let patch = M::parse_input(field, raw)?;
        (self.on_change)(&patch);
        Ok(())
    }

    /// Handles an input event carrying the external field name.
    pub fn change_named(&mut self, name: &str, raw: &str) -> Result<(), FormError> {
        let field = <M::Field as FormField>::parse(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        self.change(field, raw)
    }
}

pub(crate) fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub(crate) fn require_text(value: &str, field: &'static str) -> Result<String, FormError> {
    optional_text(value).ok_or(FormError::MissingField(field))
}

pub(crate) fn invalid_option(field: &'static str, raw: &str) -> FormError {
    FormError::InvalidOption {
        field,
        value: raw.to_string(),
    }
}
