//! Repository methods on [`GrcService`](crate::service::GrcService), one module per table.

pub mod audit;
pub mod governance;
pub mod object_objective;
pub mod objective;
