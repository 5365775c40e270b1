//! Per-row and per-batch import reports.

use std::fmt;

use grc_core::entities::{GovernanceObject, Objective};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A human-readable error or warning attached to a column heading.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RowMessage {
    pub label: String,
    pub text: String,
}

impl RowMessage {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

impl fmt::Display for RowMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// What happened to a row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RowOutcome {
    Created,
    Updated,
    /// Failed validation, nothing persisted.
    Skipped,
    /// The store rejected the row and the batch carried on.
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RowReport {
    /// Sheet line the row came from (1-based, counting the header block).
    pub line: usize,
    pub slug: Option<String>,
    pub outcome: RowOutcome,
    pub objective: Option<Objective>,
    /// Whether a new association with the batch owner was created.
    pub linked: bool,
    pub errors: Vec<RowMessage>,
    pub warnings: Vec<RowMessage>,
}

impl RowReport {
    pub(crate) const fn new(line: usize, slug: Option<String>) -> Self {
        Self {
            line,
            slug,
            outcome: RowOutcome::Skipped,
            objective: None,
            linked: false,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// Result of one batch against a single owner.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ImportReport {
    pub parent: GovernanceObject,
    pub dry_run: bool,
    /// Batch-level advisories, such as unrecognised columns.
    pub warnings: Vec<String>,
    pub rows: Vec<RowReport>,
}

impl ImportReport {
    fn count(&self, outcome: RowOutcome) -> usize {
        self.rows.iter().filter(|r| r.outcome == outcome).count()
    }

    pub fn created(&self) -> usize {
        self.count(RowOutcome::Created)
    }

    pub fn updated(&self) -> usize {
        self.count(RowOutcome::Updated)
    }

    pub fn skipped(&self) -> usize {
        self.count(RowOutcome::Skipped)
    }

    pub fn failed(&self) -> usize {
        self.count(RowOutcome::Failed)
    }

    pub fn linked(&self) -> usize {
        self.rows.iter().filter(|r| r.linked).count()
    }

    pub fn has_errors(&self) -> bool {
        self.rows.iter().any(|r| !r.errors.is_empty())
    }

    /// Pretty JSON rendering for hosts that hand the report back to a UI.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// JSON Schema describing [`ImportReport`].
    #[must_use]
    pub fn json_schema() -> serde_json::Value {
        serde_json::to_value(schemars::schema_for!(ImportReport)).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use grc_core::enums::ParentKind;
    use pretty_assertions::assert_eq;

    fn report() -> ImportReport {
        let now = Utc::now();
        let mut skipped = RowReport::new(6, Some("OBJ-1".into()));
        skipped.errors.push(RowMessage::new("Title", "missing Title"));
        let mut created = RowReport::new(7, Some("OBJ-2".into()));
        created.outcome = RowOutcome::Created;
        created.linked = true;
        ImportReport {
            parent: GovernanceObject {
                id: 42,
                kind: ParentKind::Policy,
                slug: "POL-8".into(),
                title: "Records".into(),
                created_at: now,
                updated_at: now,
            },
            dry_run: false,
            warnings: Vec::new(),
            rows: vec![skipped, created],
        }
    }

    #[test]
    fn counters() {
        let report = report();
        assert_eq!(report.created(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.updated(), 0);
        assert_eq!(report.failed(), 0);
        assert_eq!(report.linked(), 1);
        assert!(report.has_errors());
    }

    #[test]
    fn json_uses_snake_case_outcomes() {
        let json: serde_json::Value = serde_json::from_str(&report().to_json().unwrap()).unwrap();
        assert_eq!(json["rows"][0]["outcome"], "skipped");
        assert_eq!(json["rows"][0]["errors"][0]["label"], "Title");
        assert_eq!(json["parent"]["kind"], "policy");
    }

    #[test]
    fn schema_names_report_fields() {
        let schema = ImportReport::json_schema();
        let properties = &schema["properties"];
        for field in ["parent", "dry_run", "warnings", "rows"] {
            assert!(properties.get(field).is_some(), "schema should describe {field}");
        }
    }

    #[test]
    fn message_displays_text_only() {
        assert_eq!(RowMessage::new("URL", "bad url").to_string(), "bad url");
    }
}
