//! Batch-level import errors.
//!
//! Row validation problems never surface here; they are collected into the
//! [`ImportReport`](crate::report::ImportReport). These errors stop a batch.

use grc_core::enums::ParentKind;
use grc_core::errors::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    /// The sheet's metadata does not describe the targeted owner.
    #[error("Inconsistent import metadata: {}", .0.join("; "))]
    Consistency(Vec<String>),

    /// The batch's owner does not exist.
    #[error("{kind} {id} not found")]
    ParentNotFound { kind: ParentKind, id: i64 },

    /// The store failed and the batch is configured to abort.
    #[error(transparent)]
    Store(#[from] StoreError),
}
