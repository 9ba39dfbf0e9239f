//! Homecare domain model.
//!
//! # Responsibility
//! - Define canonical records used by forms, lists, detail views and the
//!   finances module.
//! - Enforce cross-field invariants at construction time (budget version/type,
//!   attendance pairing).
//!
//! # Invariants
//! - Every record is identified by a stable UUID.
//! - Money is stored in integer centavos.

pub mod assessment;
pub mod auth;
pub mod budget;
pub mod money;
pub mod notification;
pub mod patient;
pub mod price_table;
pub mod professional;
pub mod schedule;
pub mod service;
