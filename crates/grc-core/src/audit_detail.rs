//! Typed audit detail payloads.
//!
//! Each audit action can carry a structured `detail` JSON blob. These types
//! provide schema validation for the detail shapes the store writes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Detail for `AuditAction::Created` and `AuditAction::Updated` on objectives.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ObjectiveDetail {
    pub slug: String,
    pub title: String,
}

/// Detail for `AuditAction::Linked`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LinkedDetail {
    pub owner_type: String,
    pub owner_id: i64,
    pub objective_id: i64,
}
