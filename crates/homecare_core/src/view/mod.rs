//! Display projections for list and detail screens.
//!
//! # Responsibility
//! - Map domain records into rendered rows and formatted detail fields.
//! - Keep presentation free of mutation; screens own their collections.

pub mod budget_list;
pub mod detail;
pub mod table;
