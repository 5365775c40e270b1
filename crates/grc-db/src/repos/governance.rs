//! Governance object repository: the owners objectives are imported under.

use chrono::Utc;
use grc_core::entities::GovernanceObject;
use grc_core::enums::{AuditAction, EntityType, ParentKind};

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, parse_enum};
use crate::repos::audit::record;
use crate::service::GrcService;

const COLUMNS: &str = "id, kind, slug, title, created_at, updated_at";

fn row_to_governance_object(row: &libsql::Row) -> Result<GovernanceObject, DatabaseError> {
    Ok(GovernanceObject {
        id: row.get::<i64>(0)?,
        kind: parse_enum(&row.get::<String>(1)?)?,
        slug: row.get::<String>(2)?,
        title: row.get::<String>(3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        updated_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl GrcService {
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails, including when `slug` is
    /// already taken for `kind`.
    pub async fn create_governance_object(
        &self,
        kind: ParentKind,
        slug: &str,
        title: &str,
    ) -> Result<GovernanceObject, DatabaseError> {
        let now = Utc::now();
        let tx = self.db().conn().transaction().await?;
        tx.execute(
            "INSERT INTO governance_objects (kind, slug, title, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)",
            libsql::params![kind.as_str(), slug, title, now.to_rfc3339()],
        )
        .await?;
        let id = tx.last_insert_rowid();
        record(
            &tx,
            EntityType::GovernanceObject,
            id.to_string(),
            AuditAction::Created,
            Some(serde_json::json!({ "kind": kind.as_str(), "slug": slug })),
        )
        .await?;
        tx.commit().await?;

        Ok(GovernanceObject {
            id,
            kind,
            slug: slug.to_string(),
            title: title.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Fetch the object with `id`, provided it is of `kind`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_governance_object(
        &self,
        kind: ParentKind,
        id: i64,
    ) -> Result<Option<GovernanceObject>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {COLUMNS} FROM governance_objects WHERE id = ?1 AND kind = ?2"),
                libsql::params![id, kind.as_str()],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_governance_object(&row)?)),
            None => Ok(None),
        }
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_governance_object(
        &self,
        kind: ParentKind,
        slug: &str,
    ) -> Result<Option<GovernanceObject>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {COLUMNS} FROM governance_objects WHERE kind = ?1 AND slug = ?2"),
                libsql::params![kind.as_str(), slug],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_governance_object(&row)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::audit::AuditFilter;
    use crate::test_support::helpers::test_service;
    use rstest::rstest;

    #[rstest]
    #[case(ParentKind::Directive)]
    #[case(ParentKind::Regulation)]
    #[case(ParentKind::Contract)]
    #[case(ParentKind::Program)]
    #[case(ParentKind::Control)]
    #[tokio::test]
    async fn every_kind_roundtrips(#[case] kind: ParentKind) {
        let svc = test_service().await;
        let created = svc.create_governance_object(kind, "GOV-1", "Owner").await.unwrap();
        let fetched = svc.get_governance_object(kind, created.id).await.unwrap();
        assert_eq!(fetched.map(|g| g.kind), Some(kind));
    }

    #[tokio::test]
    async fn create_and_get() {
        let svc = test_service().await;
        let created = svc
            .create_governance_object(ParentKind::Policy, "POL-8", "Records policy")
            .await
            .unwrap();

        let fetched = svc
            .get_governance_object(ParentKind::Policy, created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.slug, "POL-8");
        assert_eq!(fetched.kind, ParentKind::Policy);
        assert_eq!(fetched.title, "Records policy");
    }

    #[tokio::test]
    async fn get_checks_kind() {
        let svc = test_service().await;
        let created = svc
            .create_governance_object(ParentKind::Policy, "POL-8", "Records policy")
            .await
            .unwrap();
        let wrong = svc
            .get_governance_object(ParentKind::Regulation, created.id)
            .await
            .unwrap();
        assert!(wrong.is_none());
    }

    #[tokio::test]
    async fn find_by_slug_and_audit() {
        let svc = test_service().await;
        let created = svc
            .create_governance_object(ParentKind::Standard, "STD-1", "Baseline")
            .await
            .unwrap();

        let found = svc
            .find_governance_object(ParentKind::Standard, "STD-1")
            .await
            .unwrap();
        assert_eq!(found.map(|g| g.id), Some(created.id));

        let audit = svc
            .query_audit(&AuditFilter {
                entity_type: Some(EntityType::GovernanceObject),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].entity_id, created.id.to_string());
    }

    #[tokio::test]
    async fn slug_unique_per_kind() {
        let svc = test_service().await;
        svc.create_governance_object(ParentKind::Policy, "X-1", "A")
            .await
            .unwrap();
        assert!(
            svc.create_governance_object(ParentKind::Policy, "X-1", "B")
                .await
                .is_err()
        );
        svc.create_governance_object(ParentKind::Contract, "X-1", "C")
            .await
            .unwrap();
    }
}
