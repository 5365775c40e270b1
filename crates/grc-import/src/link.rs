//! Idempotent association of objectives with their directive owner.

use grc_core::entities::{GovernanceObject, NewAssociation, ObjectObjective, Objective};
use grc_core::errors::{CoreError, StoreError};
use grc_core::ports::AssociationStore;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// The owner is not directive-like; nothing to link.
    NotApplicable,
    AlreadyLinked,
    Created(ObjectObjective),
}

impl LinkOutcome {
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Ensures at most one association per `(owner_type, owner_id, objective_id)`.
///
/// The count-then-create pair is not atomic. Stores that can see concurrent
/// writers must also reject duplicates themselves and treat the conflict as
/// a no-op, which the libSQL store does with a unique index.
pub struct RelationshipLinker<'a, S> {
    store: &'a S,
}

impl<'a, S: AssociationStore> RelationshipLinker<'a, S> {
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// # Errors
    ///
    /// Returns `StoreError` if `objective` has not been saved yet, or if the
    /// store fails counting or creating the association.
    pub async fn link_if_absent(
        &self,
        objective: &Objective,
        parent: &GovernanceObject,
    ) -> Result<LinkOutcome, StoreError> {
        if !parent.kind.is_directive() {
            return Ok(LinkOutcome::NotApplicable);
        }
        let objective_id = objective.id.ok_or_else(|| {
            CoreError::Validation(format!(
                "objective {} must be saved before it can be linked",
                objective.slug
            ))
        })?;
        let owner_type = parent.kind.type_name();

        let existing = self
            .store
            .count_associations(owner_type, parent.id, objective_id)
            .await?;
        if existing > 0 {
            debug!(owner_type, owner_id = parent.id, objective_id, "association exists");
            return Ok(LinkOutcome::AlreadyLinked);
        }

        let association = self
            .store
            .create_association(&NewAssociation {
                owner_type: owner_type.to_string(),
                owner_id: parent.id,
                objective_id,
            })
            .await?;
        debug!(owner_type, owner_id = parent.id, objective_id, "association created");
        Ok(LinkOutcome::Created(association))
    }
}
