//! Service layer hosting the repository methods.
//!
//! `GrcService` wraps `GrcDb`. All repo methods are implemented as
//! `impl GrcService` in [`crate::repos`]; every mutation appends an audit
//! entry after its SQL succeeds.

use grc_config::DatabaseConfig;

use crate::GrcDb;
use crate::error::DatabaseError;

pub struct GrcService {
    db: GrcDb,
}

impl GrcService {
    /// Create a service over a local database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        Ok(Self {
            db: GrcDb::open_local(db_path).await?,
        })
    }

    /// Create a service over the database named in configuration.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        Ok(Self {
            db: GrcDb::open(config).await?,
        })
    }

    #[must_use]
    pub const fn from_db(db: GrcDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &GrcDb {
        &self.db
    }
}
