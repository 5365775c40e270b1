//! # grc-db
//!
//! libSQL storage for GRC objectives, the governance objects that own them,
//! and the `object_objectives` association table.
//!
//! [`GrcService`](service::GrcService) hosts the repository methods and
//! implements the `grc_core::ports` traits, so it can be handed straight to
//! the import pipeline.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
mod store;

#[cfg(test)]
mod test_support;

use std::path::Path;

use error::DatabaseError;
use grc_config::DatabaseConfig;
use libsql::Builder;
use tracing::debug;

/// Database handle wrapping a libSQL database and its connection.
pub struct GrcDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl GrcDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let grc_db = Self { db, conn };
        grc_db.run_migrations().await?;
        debug!(path, "database opened");
        Ok(grc_db)
    }

    /// Open the database named by `config`, creating its parent directory.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the directory cannot be created or the
    /// database cannot be opened.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        if !config.is_in_memory() {
            match Path::new(&config.path).parent() {
                Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)?,
                _ => {}
            }
        }
        Self::open_local(&config.path).await
    }

    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"aud-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        generate_id_on(&self.conn, prefix).await
    }
}

/// [`GrcDb::generate_id`] on a given connection, so an open transaction can
/// stamp its own audit rows.
pub(crate) async fn generate_id_on(
    conn: &libsql::Connection,
    prefix: &str,
) -> Result<String, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
            (),
        )
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    Ok(row.get::<String>(0)?)
}
