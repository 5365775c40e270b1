//! Parent kinds, objective attributes, entity types, and audit actions.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and expose `as_str()` for SQL storage.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ParentKind
// ---------------------------------------------------------------------------

/// Kind of object that can own objectives in an import batch.
///
/// The first five variants are the directive-like kinds. Only those get an
/// `ObjectObjective` association when an objective is imported under them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ParentKind {
    Directive,
    Policy,
    Regulation,
    Contract,
    Standard,
    Program,
    System,
    Control,
}

impl ParentKind {
    pub const ALL: [Self; 8] = [
        Self::Directive,
        Self::Policy,
        Self::Regulation,
        Self::Contract,
        Self::Standard,
        Self::Program,
        Self::System,
        Self::Control,
    ];

    /// Whether objectives imported under this kind are associated with it.
    #[must_use]
    pub const fn is_directive(self) -> bool {
        matches!(
            self,
            Self::Directive | Self::Policy | Self::Regulation | Self::Contract | Self::Standard
        )
    }

    /// Stable type tag stored in `object_objectives.objectiveable_type` and
    /// shown in spreadsheet headings (`"Policy Code"`).
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Directive => "Directive",
            Self::Policy => "Policy",
            Self::Regulation => "Regulation",
            Self::Contract => "Contract",
            Self::Standard => "Standard",
            Self::Program => "Program",
            Self::System => "System",
            Self::Control => "Control",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Directive => "directive",
            Self::Policy => "policy",
            Self::Regulation => "regulation",
            Self::Contract => "contract",
            Self::Standard => "standard",
            Self::Program => "program",
            Self::System => "system",
            Self::Control => "control",
        }
    }

    /// Reverse of [`type_name`](Self::type_name).
    #[must_use]
    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_name() == name)
    }
}

impl fmt::Display for ParentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

// ---------------------------------------------------------------------------
// ObjectiveAttr
// ---------------------------------------------------------------------------

/// The statically declared attribute set of an objective.
///
/// Field tables map spreadsheet headings onto these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveAttr {
    Slug,
    Title,
    Description,
    Url,
    Notes,
    CreatedAt,
    UpdatedAt,
}

impl ObjectiveAttr {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Slug => "slug",
            Self::Title => "title",
            Self::Description => "description",
            Self::Url => "url",
            Self::Notes => "notes",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }

    /// Timestamps are owned by the store and never taken from a row.
    #[must_use]
    pub const fn is_system_managed(self) -> bool {
        matches!(self, Self::CreatedAt | Self::UpdatedAt)
    }
}

impl fmt::Display for ObjectiveAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Type of action recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    Updated,
    Linked,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Linked => "linked",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Type of entity in the system, used in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Objective,
    GovernanceObject,
    ObjectObjective,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Objective => "objective",
            Self::GovernanceObject => "governance_object",
            Self::ObjectObjective => "object_objective",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
