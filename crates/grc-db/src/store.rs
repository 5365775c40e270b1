//! `grc_core::ports` implemented over the repository methods.

use grc_core::entities::{GovernanceObject, NewAssociation, ObjectObjective, Objective};
use grc_core::enums::ParentKind;
use grc_core::errors::StoreError;
use grc_core::ports::{AssociationStore, ObjectiveStore, ParentLookup};

use crate::service::GrcService;

impl ObjectiveStore for GrcService {
    async fn find_objective_by_slug(&self, slug: &str) -> Result<Option<Objective>, StoreError> {
        Ok(self.get_objective_by_slug(slug).await?)
    }

    async fn save_objective(&self, objective: &Objective) -> Result<Objective, StoreError> {
        let saved = if objective.is_persisted() {
            self.update_objective(objective).await?
        } else {
            self.create_objective(objective).await?
        };
        Ok(saved)
    }
}

impl ParentLookup for GrcService {
    async fn lookup_parent(
        &self,
        kind: ParentKind,
        id: i64,
    ) -> Result<Option<GovernanceObject>, StoreError> {
        Ok(self.get_governance_object(kind, id).await?)
    }
}

impl AssociationStore for GrcService {
    async fn count_associations(
        &self,
        owner_type: &str,
        owner_id: i64,
        objective_id: i64,
    ) -> Result<u64, StoreError> {
        Ok(self
            .count_object_objectives(owner_type, owner_id, objective_id)
            .await?)
    }

    async fn create_association(
        &self,
        association: &NewAssociation,
    ) -> Result<ObjectObjective, StoreError> {
        Ok(self.link_objective(association).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seed_parent, test_service};

    #[tokio::test]
    async fn save_inserts_then_updates() {
        let svc = test_service().await;
        let created = svc
            .save_objective(&Objective::new("OBJ-1", "First"))
            .await
            .unwrap();
        let renamed = Objective {
            title: "Second".into(),
            ..created.clone()
        };
        let updated = svc.save_objective(&renamed).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Second");
        let found = svc.find_objective_by_slug("OBJ-1").await.unwrap().unwrap();
        assert_eq!(found.title, "Second");
    }

    #[tokio::test]
    async fn lookup_parent_by_kind_and_id() {
        let svc = test_service().await;
        let policy = seed_parent(&svc, ParentKind::Policy, "POL-8").await;

        let found = svc.lookup_parent(ParentKind::Policy, policy.id).await.unwrap();
        assert_eq!(found.map(|p| p.slug), Some("POL-8".to_string()));
        assert!(
            svc.lookup_parent(ParentKind::Contract, policy.id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn store_errors_carry_database_message() {
        let svc = test_service().await;
        let ghost = Objective {
            id: Some(9),
            ..Objective::new("OBJ-9", "Ghost")
        };
        let err = svc.save_objective(&ghost).await.unwrap_err();
        assert_eq!(err.to_string(), "Store error: No result returned");
    }
}
