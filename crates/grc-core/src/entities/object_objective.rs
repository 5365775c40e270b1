use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Association between an objective and a directive-like owner.
///
/// At most one exists per `(owner_type, owner_id, objective_id)`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ObjectObjective {
    pub id: i64,
    pub owner_type: String,
    pub owner_id: i64,
    pub objective_id: i64,
    pub created_at: DateTime<Utc>,
}

/// The identifying triple of an association that has not been stored yet.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct NewAssociation {
    pub owner_type: String,
    pub owner_id: i64,
    pub objective_id: i64,
}
