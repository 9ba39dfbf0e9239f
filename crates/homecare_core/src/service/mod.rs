//! Use-case services over the domain model.
//!
//! # Responsibility
//! - Own screen-level collections and their state transitions.
//! - Attribute audited changes to the acting session.

pub mod finances;
