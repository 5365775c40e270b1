//! Objective association repository (`object_objectives`).
//!
//! The owner is polymorphic: `objectiveable_type` holds its type name
//! (`"Policy"`, `"Regulation"`, ...) and `objectiveable_id` its id.

use grc_core::audit_detail::LinkedDetail;
use grc_core::entities::{NewAssociation, ObjectObjective};
use grc_core::enums::{AuditAction, EntityType};
use tracing::debug;

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, to_detail};
use crate::repos::audit::record;
use crate::service::GrcService;

const COLUMNS: &str = "id, objectiveable_type, objectiveable_id, objective_id, created_at";

fn row_to_association(row: &libsql::Row) -> Result<ObjectObjective, DatabaseError> {
    Ok(ObjectObjective {
        id: row.get::<i64>(0)?,
        owner_type: row.get::<String>(1)?,
        owner_id: row.get::<i64>(2)?,
        objective_id: row.get::<i64>(3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl GrcService {
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_object_objectives(
        &self,
        owner_type: &str,
        owner_id: i64,
        objective_id: i64,
    ) -> Result<u64, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT COUNT(*) FROM object_objectives
                 WHERE objectiveable_type = ?1 AND objectiveable_id = ?2 AND objective_id = ?3",
                libsql::params![owner_type, owner_id, objective_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let count = row.get::<i64>(0)?;
        u64::try_from(count)
            .map_err(|_| DatabaseError::InvalidState(format!("negative count {count}")))
    }

    /// Associate an objective with an owner.
    ///
    /// An existing association for the same triple is returned unchanged
    /// rather than duplicated; only a new row is audited, in the same
    /// transaction as the insert.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails, e.g. for an unknown
    /// objective id.
    pub async fn link_objective(
        &self,
        association: &NewAssociation,
    ) -> Result<ObjectObjective, DatabaseError> {
        let tx = self.db().conn().transaction().await?;
        let inserted = tx
            .execute(
                "INSERT INTO object_objectives (objectiveable_type, objectiveable_id, objective_id, created_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT (objectiveable_type, objectiveable_id, objective_id) DO NOTHING",
                libsql::params![
                    association.owner_type.as_str(),
                    association.owner_id,
                    association.objective_id,
                    chrono::Utc::now().to_rfc3339()
                ],
            )
            .await?;

        let mut rows = tx
            .query(
                &format!(
                    "SELECT {COLUMNS} FROM object_objectives
                     WHERE objectiveable_type = ?1 AND objectiveable_id = ?2 AND objective_id = ?3"
                ),
                libsql::params![
                    association.owner_type.as_str(),
                    association.owner_id,
                    association.objective_id
                ],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let stored = row_to_association(&row)?;
        drop(rows);

        if inserted > 0 {
            record(
                &tx,
                EntityType::ObjectObjective,
                stored.id.to_string(),
                AuditAction::Linked,
                Some(to_detail(&LinkedDetail {
                    owner_type: stored.owner_type.clone(),
                    owner_id: stored.owner_id,
                    objective_id: stored.objective_id,
                })?),
            )
            .await?;
        } else {
            debug!(
                owner_type = %stored.owner_type,
                owner_id = stored.owner_id,
                objective_id = stored.objective_id,
                "association already present, insert skipped"
            );
        }
        tx.commit().await?;
        Ok(stored)
    }

    /// Every association of one objective, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_object_objectives(
        &self,
        objective_id: i64,
    ) -> Result<Vec<ObjectObjective>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {COLUMNS} FROM object_objectives WHERE objective_id = ?1 ORDER BY id"
                ),
                [objective_id],
            )
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_association(&row)?);
        }
        Ok(results)
    }
}
