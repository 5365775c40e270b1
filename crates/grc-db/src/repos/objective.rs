//! Objective repository: CRUD keyed by id and by slug.

use chrono::Utc;
use grc_core::audit_detail::ObjectiveDetail;
use grc_core::entities::Objective;
use grc_core::enums::{AuditAction, EntityType, ParentKind};
use tracing::debug;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, to_detail};
use crate::repos::audit::record;
use crate::service::GrcService;

const COLUMNS: &str = "id, slug, title, description, url, notes, created_at, updated_at";

fn row_to_objective(row: &libsql::Row) -> Result<Objective, DatabaseError> {
    Ok(Objective {
        id: Some(row.get::<i64>(0)?),
        slug: row.get::<String>(1)?,
        title: row.get::<String>(2)?,
        description: get_opt_string(row, 3)?,
        url: get_opt_string(row, 4)?,
        notes: get_opt_string(row, 5)?,
        created_at: Some(parse_datetime(&row.get::<String>(6)?)?),
        updated_at: Some(parse_datetime(&row.get::<String>(7)?)?),
    })
}

fn detail(objective: &Objective) -> Result<serde_json::Value, DatabaseError> {
    to_detail(&ObjectiveDetail {
        slug: objective.slug.clone(),
        title: objective.title.clone(),
    })
}

impl GrcService {
    /// Insert a new objective. `id` and timestamps on the input are ignored.
    /// The row and its audit entry commit together.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails, including on a duplicate slug.
    pub async fn create_objective(&self, objective: &Objective) -> Result<Objective, DatabaseError> {
        let now = Utc::now();
        let tx = self.db().conn().transaction().await?;
        tx.execute(
            "INSERT INTO objectives (slug, title, description, url, notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
            libsql::params![
                objective.slug.as_str(),
                objective.title.as_str(),
                objective.description.as_deref(),
                objective.url.as_deref(),
                objective.notes.as_deref(),
                now.to_rfc3339()
            ],
        )
        .await?;
        let id = tx.last_insert_rowid();
        record(
            &tx,
            EntityType::Objective,
            id.to_string(),
            AuditAction::Created,
            Some(detail(objective)?),
        )
        .await?;
        tx.commit().await?;
        debug!(slug = %objective.slug, id, "objective inserted");

        Ok(Objective {
            id: Some(id),
            created_at: Some(now),
            updated_at: Some(now),
            ..objective.clone()
        })
    }

    /// Overwrite the mutable fields of a stored objective. The slug and
    /// creation time are left as stored. The update and its audit entry
    /// commit together.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` if `objective` has no id, and
    /// `DatabaseError::NoResult` if no row has that id.
    pub async fn update_objective(&self, objective: &Objective) -> Result<Objective, DatabaseError> {
        let id = objective.id.ok_or_else(|| {
            DatabaseError::InvalidState(format!("objective {} has no id", objective.slug))
        })?;
        let tx = self.db().conn().transaction().await?;
        let changed = tx
            .execute(
                "UPDATE objectives
                 SET title = ?2, description = ?3, url = ?4, notes = ?5, updated_at = ?6
                 WHERE id = ?1",
                libsql::params![
                    id,
                    objective.title.as_str(),
                    objective.description.as_deref(),
                    objective.url.as_deref(),
                    objective.notes.as_deref(),
                    Utc::now().to_rfc3339()
                ],
            )
            .await?;
        if changed == 0 {
            tx.rollback().await?;
            return Err(DatabaseError::NoResult);
        }
        record(
            &tx,
            EntityType::Objective,
            id.to_string(),
            AuditAction::Updated,
            Some(detail(objective)?),
        )
        .await?;
        tx.commit().await?;
        debug!(slug = %objective.slug, id, "objective updated");

        self.get_objective(id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no objective has `id`.
    pub async fn get_objective(&self, id: i64) -> Result<Objective, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {COLUMNS} FROM objectives WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_objective(&row)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_objective_by_slug(&self, slug: &str) -> Result<Option<Objective>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {COLUMNS} FROM objectives WHERE slug = ?1"), [slug])
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_objective(&row)?)),
            None => Ok(None),
        }
    }

    /// All objectives, ordered by slug.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_objectives(&self) -> Result<Vec<Objective>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {COLUMNS} FROM objectives ORDER BY slug"), ())
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_objective(&row)?);
        }
        Ok(results)
    }

    /// Objectives associated with one owner, ordered by slug. This is the
    /// set an export of the owner's sheet contains.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_objectives_for(
        &self,
        kind: ParentKind,
        owner_id: i64,
    ) -> Result<Vec<Objective>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT o.id, o.slug, o.title, o.description, o.url, o.notes, o.created_at, o.updated_at
                 FROM objectives o
                 JOIN object_objectives oo ON oo.objective_id = o.id
                 WHERE oo.objectiveable_type = ?1 AND oo.objectiveable_id = ?2
                 ORDER BY o.slug",
                libsql::params![kind.type_name(), owner_id],
            )
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_objective(&row)?);
        }
        Ok(results)
    }
}
