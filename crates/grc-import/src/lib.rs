//! # grc-import
//!
//! Spreadsheet import of objectives under a policy, regulation, contract,
//! standard, or other owner.
//!
//! A batch flows row by row through three stages:
//! - [`RowMapper`](mapper::RowMapper) coerces cells through a [`FieldSpec`](fields::FieldSpec)
//! - [`Reconciler`](reconcile::Reconciler) decides create vs update by slug
//! - [`RelationshipLinker`](link::RelationshipLinker) associates the saved
//!   objective with a directive-like owner exactly once
//!
//! [`ObjectivesConverter`](converter::ObjectivesConverter) drives a batch,
//! validates the sheet metadata, and regenerates the sheet layout for export.
//! Storage is reached only through the `grc_core::ports` traits.

pub mod converter;
pub mod error;
pub mod fields;
pub mod link;
pub mod logging;
pub mod mapper;
pub mod reconcile;
pub mod report;
pub mod row;

#[cfg(test)]
mod test_support;

pub use converter::{ImportOptions, ObjectivesConverter};
pub use error::ImportError;
pub use fields::FieldSpec;
pub use report::ImportReport;
pub use row::Row;
