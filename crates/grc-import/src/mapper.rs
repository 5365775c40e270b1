//! Row → objective field mapping.
//!
//! [`RowMapper`] walks a [`FieldSpec`] in order, coercing each cell and
//! collecting every error in a single pass. It never touches the store.

use chrono::NaiveDate;
use grc_core::enums::ObjectiveAttr;
use serde::Serialize;

use crate::fields::{Coercion, FieldDirective, FieldSpec};
use crate::report::RowMessage;
use crate::row::Row;

/// Accepted in addition to the configured format.
const ISO_DATE: &str = "%Y-%m-%d";

/// Successfully coerced values, one slot per objective attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ObjectiveValues {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<NaiveDate>,
    pub updated_at: Option<NaiveDate>,
}

/// A coerced cell before it is placed in its attribute slot.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Coerced {
    Text(String),
    Date(NaiveDate),
}

impl ObjectiveValues {
    /// Place `value` in the slot for `attr`. Returns the value back when
    /// its kind does not fit the attribute.
    fn assign(&mut self, attr: ObjectiveAttr, value: Coerced) -> Result<(), Coerced> {
        match (attr, value) {
            (ObjectiveAttr::Slug, Coerced::Text(v)) => self.slug = Some(v),
            (ObjectiveAttr::Title, Coerced::Text(v)) => self.title = Some(v),
            (ObjectiveAttr::Description, Coerced::Text(v)) => self.description = Some(v),
            (ObjectiveAttr::Url, Coerced::Text(v)) => self.url = Some(v),
            (ObjectiveAttr::Notes, Coerced::Text(v)) => self.notes = Some(v),
            (ObjectiveAttr::CreatedAt, Coerced::Date(d)) => self.created_at = Some(d),
            (ObjectiveAttr::UpdatedAt, Coerced::Date(d)) => self.updated_at = Some(d),
            (_, mismatched) => return Err(mismatched),
        }
        Ok(())
    }
}

/// Fields of a row that passed validation, ready for reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedObjective {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
}

/// Output of [`RowMapper::map_row`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MappedRow {
    pub values: ObjectiveValues,
    pub errors: Vec<RowMessage>,
    pub warnings: Vec<RowMessage>,
}

impl MappedRow {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Gate for the reconciler: a row with any error, or one whose table
    /// never produced a slug and title, does not get past here.
    ///
    /// # Errors
    ///
    /// Returns the collected row errors.
    pub fn into_validated(self) -> Result<ValidatedObjective, Vec<RowMessage>> {
        let mut errors = self.errors;
        let values = self.values;
        if errors.is_empty() {
            if values.slug.is_none() {
                errors.push(RowMessage::new(ObjectiveAttr::Slug.as_str(), "missing slug"));
            }
            if values.title.is_none() {
                errors.push(RowMessage::new(ObjectiveAttr::Title.as_str(), "missing title"));
            }
        }
        match (values.slug, values.title) {
            (Some(slug), Some(title)) if errors.is_empty() => Ok(ValidatedObjective {
                slug,
                title,
                description: values.description,
                url: values.url,
                notes: values.notes,
            }),
            _ => Err(errors),
        }
    }
}

/// Maps rows through a borrowed field table.
#[derive(Debug, Clone, Copy)]
pub struct RowMapper<'a> {
    spec: &'a FieldSpec,
    date_format: &'a str,
}

impl<'a> RowMapper<'a> {
    pub const fn new(spec: &'a FieldSpec, date_format: &'a str) -> Self {
        Self { spec, date_format }
    }

    pub fn map_row(&self, row: &Row) -> MappedRow {
        let mut mapped = MappedRow::default();
        for directive in self.spec.directives() {
            if directive.import_excluded {
                continue;
            }
            let raw = row.get(&directive.label).unwrap_or_default().trim();
            if raw.is_empty() {
                if directive.required || directive.coercion == Coercion::Slug {
                    mapped
                        .errors
                        .push(RowMessage::new(&directive.label, format!("missing {}", directive.label)));
                }
                continue;
            }
            if let Err(message) = self.coerce(directive, raw, &mut mapped.values) {
                mapped.errors.push(message);
            }
        }
        mapped
    }

    fn coerce(
        &self,
        directive: &FieldDirective,
        raw: &str,
        values: &mut ObjectiveValues,
    ) -> Result<(), RowMessage> {
        let label = &directive.label;
        let value = match directive.coercion {
            Coercion::Raw | Coercion::Slug => Coerced::Text(raw.to_string()),
            Coercion::TextOrHtml => Coerced::Text(text_or_html(raw)),
            Coercion::Date => Coerced::Date(parse_date(raw, self.date_format).ok_or_else(|| {
                RowMessage::new(
                    label,
                    format!(
                        "{label}: '{raw}' is not a valid date (expected {})",
                        self.date_format
                    ),
                )
            })?),
        };
        values.assign(directive.attr, value).map_err(|_| {
            RowMessage::new(
                label,
                format!(
                    "{label}: {} column cannot hold {}",
                    directive.attr.as_str(),
                    coercion_name(directive.coercion)
                ),
            )
        })
    }
}

const fn coercion_name(coercion: Coercion) -> &'static str {
    match coercion {
        Coercion::Raw | Coercion::Slug | Coercion::TextOrHtml => "text",
        Coercion::Date => "a date",
    }
}

fn parse_date(raw: &str, format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, format)
        .or_else(|_| NaiveDate::parse_from_str(raw, ISO_DATE))
        .ok()
}

/// Keep markup as-is; turn the line breaks of plain text into `<br>`.
///
/// Plain text is not entity-escaped, so a value exported and imported again
/// comes back unchanged: `<br>` makes it markup on the second pass.
pub fn text_or_html(raw: &str) -> String {
    if looks_like_html(raw) {
        return raw.to_string();
    }
    raw.lines().collect::<Vec<_>>().join("<br>")
}

/// A `<` followed by a tag name or `/`, closed by a later `>`.
fn looks_like_html(text: &str) -> bool {
    text.match_indices('<').any(|(idx, _)| {
        let rest = &text[idx + 1..];
        rest.starts_with(|c: char| c.is_ascii_alphabetic() || c == '/') && rest.contains('>')
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn mapper(spec: &FieldSpec) -> RowMapper<'_> {
        RowMapper::new(spec, "%m/%d/%Y")
    }

    fn objective_row(code: &str, title: &str) -> Row {
        Row::new()
            .with("Objective Code", code)
            .with("Title", title)
            .with("URL", "")
            .with("Notes", "")
    }

    #[test]
    fn maps_minimal_row() {
        let spec = FieldSpec::objectives();
        let mapped = mapper(&spec).map_row(&objective_row("OBJ-1", "Data Retention"));

        assert!(mapped.is_valid());
        assert!(mapped.warnings.is_empty());
        assert_eq!(mapped.values.slug.as_deref(), Some("OBJ-1"));
        assert_eq!(mapped.values.title.as_deref(), Some("Data Retention"));
        assert_eq!(mapped.values.url, None);
        assert_eq!(mapped.values.notes, None);
    }

    #[test]
    fn slug_is_trimmed() {
        let spec = FieldSpec::objectives();
        let mapped = mapper(&spec).map_row(&objective_row("  OBJ-7 \t", "T"));
        assert_eq!(mapped.values.slug.as_deref(), Some("OBJ-7"));
    }

    #[test]
    fn missing_title_is_reported_by_label() {
        let spec = FieldSpec::objectives();
        let mapped = mapper(&spec).map_row(&objective_row("OBJ-1", ""));

        assert_eq!(
            mapped.errors,
            vec![RowMessage::new("Title", "missing Title")]
        );
        assert_eq!(mapped.values.slug.as_deref(), Some("OBJ-1"));
        assert!(mapped.into_validated().is_err());
    }

    #[test]
    fn all_errors_collected_in_one_pass() {
        let spec = FieldSpec::objectives();
        let mapped = mapper(&spec).map_row(&objective_row("   ", ""));
        let labels: Vec<_> = mapped.errors.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Objective Code", "Title"]);
    }

    #[test]
    fn absent_columns_read_as_empty() {
        let spec = FieldSpec::objectives();
        let mapped = mapper(&spec).map_row(&Row::new().with("Title", "Only title"));
        assert_eq!(
            mapped.errors,
            vec![RowMessage::new("Objective Code", "missing Objective Code")]
        );
    }

    #[test]
    fn empty_optional_slug_column_is_still_an_error() {
        let spec = FieldSpec::new(vec![
            FieldDirective::new("Code", ObjectiveAttr::Slug, Coercion::Slug),
            FieldDirective::new("Title", ObjectiveAttr::Title, Coercion::Raw).required(),
        ]);
        let mapped = mapper(&spec).map_row(&Row::new().with("Code", " ").with("Title", "t"));
        assert_eq!(mapped.errors.len(), 1);
        assert_eq!(mapped.errors[0].label, "Code");
    }

    #[test]
    fn export_only_columns_are_ignored_on_import() {
        let spec = FieldSpec::objectives();
        let row = objective_row("OBJ-1", "T").with("Created", "not a date");
        let mapped = mapper(&spec).map_row(&row);
        assert!(mapped.is_valid());
        assert_eq!(mapped.values.created_at, None);
    }

    #[test]
    fn bad_date_does_not_block_other_fields() {
        let spec = FieldSpec::new(vec![
            FieldDirective::new("Objective Code", ObjectiveAttr::Slug, Coercion::Slug).required(),
            FieldDirective::new("Title", ObjectiveAttr::Title, Coercion::Raw).required(),
            FieldDirective::new("Updated", ObjectiveAttr::UpdatedAt, Coercion::Date),
            FieldDirective::new("URL", ObjectiveAttr::Url, Coercion::Raw),
        ]);
        let row = objective_row("OBJ-1", "Retention")
            .with("Updated", "31/31/2013")
            .with("URL", "https://example.com");
        let mapped = mapper(&spec).map_row(&row);

        assert_eq!(mapped.errors.len(), 1);
        assert_eq!(mapped.errors[0].label, "Updated");
        assert!(mapped.errors[0].text.contains("Updated"));
        assert_eq!(mapped.values.title.as_deref(), Some("Retention"));
        assert_eq!(mapped.values.url.as_deref(), Some("https://example.com"));
        assert_eq!(mapped.values.updated_at, None);
    }

    #[rstest]
    #[case("11/28/2013")]
    #[case("2013-11-28")]
    fn dates_parse_in_configured_or_iso_format(#[case] raw: &str) {
        let spec = FieldSpec::new(vec![FieldDirective::new(
            "Updated",
            ObjectiveAttr::UpdatedAt,
            Coercion::Date,
        )]);
        let mapped = mapper(&spec).map_row(&Row::new().with("Updated", raw));
        assert!(mapped.is_valid());
        assert_eq!(mapped.values.updated_at, NaiveDate::from_ymd_opt(2013, 11, 28));
    }

    #[rstest]
    #[case("plain text", "plain text")]
    #[case("line one\nline two", "line one<br>line two")]
    #[case("a < b & c", "a < b & c")]
    #[case("R&D budget", "R&D budget")]
    #[case("<p>kept</p>", "<p>kept</p>")]
    #[case("x <br/> y", "x <br/> y")]
    fn text_or_html_cases(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(text_or_html(raw), expected);
    }

    #[test]
    fn rich_text_columns_are_converted() {
        let spec = FieldSpec::objectives();
        let row = objective_row("OBJ-1", "T").with("Description", "first\nsecond");
        let mapped = mapper(&spec).map_row(&row);
        assert_eq!(
            mapped.values.description.as_deref(),
            Some("first<br>second")
        );
    }

    #[test]
    fn converted_text_is_stable_on_reimport() {
        for raw in ["R&D budget", "first\nsecond", "a < b"] {
            let once = text_or_html(raw);
            assert_eq!(text_or_html(&once), once, "{raw:?} changed on second pass");
        }
    }

    #[rstest]
    #[case(ObjectiveAttr::CreatedAt, Coercion::Raw, "11/28/2013")]
    #[case(ObjectiveAttr::UpdatedAt, Coercion::TextOrHtml, "2013-11-28")]
    #[case(ObjectiveAttr::Notes, Coercion::Date, "11/28/2013")]
    fn mismatched_coercion_is_a_row_error(
        #[case] attr: ObjectiveAttr,
        #[case] coercion: Coercion,
        #[case] raw: &str,
    ) {
        let spec = FieldSpec::new(vec![FieldDirective::new("Odd", attr, coercion)]);
        let mapped = mapper(&spec).map_row(&Row::new().with("Odd", raw));

        assert_eq!(mapped.errors.len(), 1);
        assert_eq!(mapped.errors[0].label, "Odd");
        assert!(mapped.errors[0].text.contains(attr.as_str()));
        assert_eq!(mapped.values, ObjectiveValues::default());
    }

    #[test]
    fn validated_objective_carries_optional_fields() {
        let spec = FieldSpec::objectives();
        let row = objective_row("OBJ-1", "T").with("URL", " https://grc.example.com ");
        let validated = mapper(&spec).map_row(&row).into_validated().unwrap();
        assert_eq!(validated.slug, "OBJ-1");
        assert_eq!(validated.url.as_deref(), Some("https://grc.example.com"));
    }

    #[test]
    fn table_without_title_cannot_validate() {
        let spec = FieldSpec::new(vec![FieldDirective::new(
            "Objective Code",
            ObjectiveAttr::Slug,
            Coercion::Slug,
        )]);
        let errors = mapper(&spec)
            .map_row(&Row::new().with("Objective Code", "OBJ-1"))
            .into_validated()
            .unwrap_err();
        assert_eq!(errors, vec![RowMessage::new("title", "missing title")]);
    }
}
