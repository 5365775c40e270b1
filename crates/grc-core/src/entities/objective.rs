use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A control objective, identified across import/export cycles by its slug.
///
/// `id` and the timestamps stay unset until the store persists the objective.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Objective {
    pub id: Option<i64>,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Objective {
    /// A not-yet-persisted objective with only its required fields set.
    #[must_use]
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: None,
            slug: slug.into(),
            title: title.into(),
            description: None,
            url: None,
            notes: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
