//! Field tables.
//!
//! A [`FieldSpec`] is the ordered heading → attribute table a converter maps
//! rows with. Tables are built once by the caller and lent to every
//! component that needs them; nothing mutates them after construction.

use grc_core::enums::{ObjectiveAttr, ParentKind};
use serde::Serialize;

/// How a raw cell is turned into an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Coercion {
    /// Trimmed text, empty meaning absent.
    Raw,
    /// Markup is kept verbatim, plain text gets its line breaks as `<br>`.
    TextOrHtml,
    /// A calendar date in the configured format.
    Date,
    /// Trimmed natural key. Empty is always an error.
    Slug,
}

/// One heading of a spreadsheet and what it maps onto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDirective {
    pub label: String,
    pub attr: ObjectiveAttr,
    pub coercion: Coercion,
    pub required: bool,
    /// Exported but never read back on import.
    pub import_excluded: bool,
}

impl FieldDirective {
    pub fn new(label: impl Into<String>, attr: ObjectiveAttr, coercion: Coercion) -> Self {
        Self {
            label: label.into(),
            attr,
            coercion,
            required: false,
            import_excluded: false,
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn export_only(mut self) -> Self {
        self.import_excluded = true;
        self
    }
}

/// Ordered list of field directives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    directives: Vec<FieldDirective>,
}

impl FieldSpec {
    pub const fn new(directives: Vec<FieldDirective>) -> Self {
        Self { directives }
    }

    /// The objectives sheet layout.
    #[must_use]
    pub fn objectives() -> Self {
        Self::new(vec![
            FieldDirective::new("Objective Code", ObjectiveAttr::Slug, Coercion::Slug).required(),
            FieldDirective::new("Title", ObjectiveAttr::Title, Coercion::Raw).required(),
            FieldDirective::new("Description", ObjectiveAttr::Description, Coercion::TextOrHtml),
            FieldDirective::new("URL", ObjectiveAttr::Url, Coercion::Raw),
            FieldDirective::new("Notes", ObjectiveAttr::Notes, Coercion::TextOrHtml),
            FieldDirective::new("Created", ObjectiveAttr::CreatedAt, Coercion::Date).export_only(),
            FieldDirective::new("Updated", ObjectiveAttr::UpdatedAt, Coercion::Date).export_only(),
        ])
    }

    pub fn directives(&self) -> &[FieldDirective] {
        &self.directives
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.directives.iter().map(|d| d.label.as_str())
    }

    /// Heading of the first directive targeting `attr`.
    pub fn label_for(&self, attr: ObjectiveAttr) -> Option<&str> {
        self.directives
            .iter()
            .find(|d| d.attr == attr)
            .map(|d| d.label.as_str())
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.labels().any(|l| l == label)
    }
}

/// What a metadata heading carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataAttr {
    /// Sheet type, always `"Objectives"` for this converter.
    Type,
    /// Slug of the owning object.
    Slug,
}

/// Ordered metadata headings of the first two sheet rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataMap {
    entries: Vec<(String, MetadataAttr)>,
}

impl MetadataMap {
    /// Headings for a sheet owned by `kind`.
    ///
    /// Directive-like owners name their own kind in the code heading, so a
    /// policy sheet reads `"Policy Code"` rather than `"Directive Code"`.
    #[must_use]
    pub fn for_parent(kind: ParentKind) -> Self {
        let base = [
            ("Type", MetadataAttr::Type),
            ("Directive Code", MetadataAttr::Slug),
        ];
        let entries = base
            .into_iter()
            .map(|(label, attr)| {
                let label = if kind.is_directive() && label.contains("Directive") {
                    label.replace("Directive", kind.type_name())
                } else {
                    label.to_string()
                };
                (label, attr)
            })
            .collect();
        Self { entries }
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn label_for(&self, attr: MetadataAttr) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, a)| *a == attr)
            .map(|(label, _)| label.as_str())
    }
}
