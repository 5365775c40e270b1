use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ParentKind;

/// A policy, regulation, contract, standard, or other owning object.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GovernanceObject {
    pub id: i64,
    pub kind: ParentKind,
    pub slug: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The owner an import batch targets, before it has been resolved.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct ParentContext {
    pub kind: ParentKind,
    pub id: i64,
}

impl ParentContext {
    #[must_use]
    pub const fn new(kind: ParentKind, id: i64) -> Self {
        Self { kind, id }
    }
}
