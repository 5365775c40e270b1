//! Cross-cutting error types for GRC imports.
//!
//! Domain-specific errors (`DatabaseError`, `ImportError`, `ConfigError`) are
//! defined in their respective crates. `StoreError` is the error every store
//! port returns, so the import pipeline never depends on a concrete backend.

use thiserror::Error;

/// Errors that can be raised by any GRC crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Failure reported by an external store behind one of the [`ports`](crate::ports).
///
/// The pipeline never inspects the cause; it only decides whether to abort
/// the batch or record the failure against the row.
#[derive(Debug, Error)]
#[error("Store error: {source}")]
pub struct StoreError {
    #[source]
    source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl StoreError {
    pub fn new(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// A store failure described only by a message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(CoreError::Other(anyhow::anyhow!(message.into())))
    }
}

impl From<CoreError> for StoreError {
    fn from(err: CoreError) -> Self {
        Self::new(err)
    }
}
