//! Store capabilities the import pipeline consumes.
//!
//! The pipeline is written against these traits; `grc-db` implements them
//! over libSQL and the import crate's tests implement them in memory. Calls
//! are awaited one at a time, so implementations need not be `Send`.

#![allow(async_fn_in_trait)]

use crate::entities::{GovernanceObject, NewAssociation, ObjectObjective, Objective};
use crate::enums::ParentKind;
use crate::errors::StoreError;

/// Lookup and persistence of objectives by natural key.
pub trait ObjectiveStore {
    /// Find the objective whose slug equals `slug`, if any.
    async fn find_objective_by_slug(&self, slug: &str) -> Result<Option<Objective>, StoreError>;

    /// Insert `objective` when its `id` is unset, update it in place otherwise.
    /// Returns the stored state with `id` and timestamps populated.
    async fn save_objective(&self, objective: &Objective) -> Result<Objective, StoreError>;
}

/// Resolution of a batch's owning object.
pub trait ParentLookup {
    async fn lookup_parent(
        &self,
        kind: ParentKind,
        id: i64,
    ) -> Result<Option<GovernanceObject>, StoreError>;
}

/// Lookup and creation of objective associations.
pub trait AssociationStore {
    async fn count_associations(
        &self,
        owner_type: &str,
        owner_id: i64,
        objective_id: i64,
    ) -> Result<u64, StoreError>;

    async fn create_association(
        &self,
        association: &NewAssociation,
    ) -> Result<ObjectObjective, StoreError>;
}
