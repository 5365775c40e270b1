//! Shared test utilities for grc-db unit tests.

pub(crate) mod helpers {
    use grc_core::entities::GovernanceObject;
    use grc_core::enums::ParentKind;

    use crate::service::GrcService;

    /// Create an in-memory `GrcService`.
    pub async fn test_service() -> GrcService {
        GrcService::new_local(":memory:").await.unwrap()
    }

    /// Insert a governance object and return it.
    pub async fn seed_parent(svc: &GrcService, kind: ParentKind, slug: &str) -> GovernanceObject {
        svc.create_governance_object(kind, slug, &format!("{kind} {slug}"))
            .await
            .unwrap()
    }
}
