//! Objectives sheet converter: the batch driver.
//!
//! A sheet is laid out as
//!
//! ```text
//! line 1  metadata headings     Type        | Policy Code
//! line 2  metadata values       Objectives  | POL-8
//! line 3  (blank)
//! line 4  (blank)
//! line 5  object headings       Objective Code | Title | ...
//! line 6+ one objective per line
//! ```
//!
//! Callers hand over lines 1 and 2 as a metadata [`Row`], line 5 as the
//! object headings, and lines 6+ as data rows keyed by those headings.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use grc_config::ImportConfig;
use grc_core::entities::{GovernanceObject, Objective, ParentContext};
use grc_core::enums::ObjectiveAttr;
use grc_core::errors::StoreError;
use grc_core::ports::{AssociationStore, ObjectiveStore, ParentLookup};
use tracing::{debug, info, warn};

use crate::error::ImportError;
use crate::fields::{FieldSpec, MetadataAttr, MetadataMap};
use crate::link::RelationshipLinker;
use crate::mapper::{RowMapper, ValidatedObjective};
use crate::reconcile::{ReconcileOutcome, Reconciler};
use crate::report::{ImportReport, RowMessage, RowOutcome, RowReport};
use crate::row::Row;

/// Value of the `Type` metadata cell this converter accepts.
pub const SHEET_TYPE: &str = "Objectives";

/// Sheet line of the first data row.
pub const FIRST_DATA_LINE: usize = 6;

/// Rendering used when the configured date format cannot render a value.
const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    pub date_format: String,
    pub dry_run: bool,
    pub abort_on_store_error: bool,
}

impl From<&ImportConfig> for ImportOptions {
    fn from(config: &ImportConfig) -> Self {
        Self {
            date_format: config.date_format.clone(),
            dry_run: config.dry_run,
            abort_on_store_error: config.abort_on_store_error,
        }
    }
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self::from(&ImportConfig::default())
    }
}

/// Imports and exports objective sheets owned by one governance object.
pub struct ObjectivesConverter<'a, S> {
    store: &'a S,
    spec: &'a FieldSpec,
    parent: GovernanceObject,
    metadata_map: MetadataMap,
    options: ImportOptions,
}

impl<'a, S> ObjectivesConverter<'a, S>
where
    S: ObjectiveStore + ParentLookup + AssociationStore,
{
    /// Resolve the batch owner and build the metadata headings for it.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::ParentNotFound` if the owner does not exist, or
    /// `ImportError::Store` if the lookup fails.
    pub async fn prepare(
        store: &'a S,
        spec: &'a FieldSpec,
        context: ParentContext,
        options: ImportOptions,
    ) -> Result<Self, ImportError> {
        let parent = store
            .lookup_parent(context.kind, context.id)
            .await?
            .ok_or(ImportError::ParentNotFound {
                kind: context.kind,
                id: context.id,
            })?;
        Ok(Self {
            store,
            spec,
            metadata_map: MetadataMap::for_parent(parent.kind),
            parent,
            options,
        })
    }

    pub const fn parent(&self) -> &GovernanceObject {
        &self.parent
    }

    pub const fn metadata_map(&self) -> &MetadataMap {
        &self.metadata_map
    }

    fn slug_label(&self) -> &str {
        self.spec.label_for(ObjectiveAttr::Slug).unwrap_or("slug")
    }

    /// Check that the sheet targets this converter's owner.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::Consistency` with every mismatch found.
    pub fn validate_metadata(&self, metadata: &Row) -> Result<(), ImportError> {
        let mut errors = Vec::new();
        let kind = self.parent.kind.type_name();

        let sheet_type = self
            .metadata_map
            .label_for(MetadataAttr::Type)
            .and_then(|label| metadata.get(label))
            .map(str::trim);
        if sheet_type != Some(SHEET_TYPE) {
            errors.push(format!("Type must be {SHEET_TYPE}"));
        }

        let code = self
            .metadata_map
            .label_for(MetadataAttr::Slug)
            .and_then(|label| metadata.get(label))
            .map(str::trim)
            .filter(|code| !code.is_empty());
        match code {
            None => errors.push(format!("Missing {kind} Code heading")),
            Some(code) if code != self.parent.slug => {
                errors.push(format!("{kind} Code must be {}", self.parent.slug));
            }
            Some(_) => {}
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ImportError::Consistency(errors))
        }
    }

    /// Advisories for headings the field table does not know.
    pub fn validate_headers<'r>(&self, labels: impl IntoIterator<Item = &'r str>) -> Vec<String> {
        labels
            .into_iter()
            .filter(|label| !label.trim().is_empty() && !self.spec.contains_label(label))
            .map(|label| format!("Unknown column '{label}' will be ignored"))
            .collect()
    }

    /// Import a batch of rows, one at a time, in order.
    ///
    /// `headers` is the object-heading line; its unknown labels become batch
    /// warnings. Rows that fail validation are reported and skipped. Blank
    /// rows are ignored but still count towards line numbers.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::Consistency` before touching any row if the
    /// metadata does not match the owner, and `ImportError::Store` on the
    /// first store failure when `abort_on_store_error` is set.
    pub async fn import<H: AsRef<str>>(
        &self,
        metadata: &Row,
        headers: &[H],
        rows: &[Row],
    ) -> Result<ImportReport, ImportError> {
        self.validate_metadata(metadata)?;

        info!(
            owner = %self.parent.kind,
            owner_slug = %self.parent.slug,
            rows = rows.len(),
            dry_run = self.options.dry_run,
            "importing objectives"
        );

        let mut report = ImportReport {
            parent: self.parent.clone(),
            dry_run: self.options.dry_run,
            warnings: self.validate_headers(headers.iter().map(AsRef::<str>::as_ref)),
            rows: Vec::with_capacity(rows.len()),
        };

        for (index, row) in rows.iter().enumerate() {
            let line = FIRST_DATA_LINE + index;
            if row.is_blank() {
                debug!(line, "skipping blank row");
                continue;
            }
            report.rows.push(self.import_row(line, row).await?);
        }

        info!(
            created = report.created(),
            updated = report.updated(),
            skipped = report.skipped(),
            failed = report.failed(),
            linked = report.linked(),
            "import finished"
        );
        Ok(report)
    }

    async fn import_row(&self, line: usize, row: &Row) -> Result<RowReport, ImportError> {
        let mut mapped = RowMapper::new(self.spec, &self.options.date_format).map_row(row);
        let mut report = RowReport::new(line, mapped.values.slug.clone());
        report.warnings = std::mem::take(&mut mapped.warnings);

        let validated = match mapped.into_validated() {
            Ok(validated) => validated,
            Err(errors) => {
                debug!(line, errors = errors.len(), "row failed validation");
                report.errors = errors;
                return Ok(report);
            }
        };

        match self.persist(validated, &mut report).await {
            Ok(()) => Ok(report),
            Err(err) if self.options.abort_on_store_error => {
                warn!(line, error = %err, "store failure, aborting import");
                Err(err.into())
            }
            Err(err) => {
                warn!(line, error = %err, "store failure, continuing");
                // A row whose objective was saved keeps its outcome; only the
                // association is missing.
                if report.objective.is_none() {
                    report.outcome = RowOutcome::Failed;
                }
                report
                    .errors
                    .push(RowMessage::new(self.slug_label(), err.to_string()));
                Ok(report)
            }
        }
    }

    async fn persist(
        &self,
        validated: ValidatedObjective,
        report: &mut RowReport,
    ) -> Result<(), StoreError> {
        let reconciled = Reconciler::new(self.store, self.slug_label())
            .reconcile(validated)
            .await?;
        report.warnings.extend(reconciled.warnings);
        let outcome = match reconciled.outcome {
            ReconcileOutcome::Created => RowOutcome::Created,
            ReconcileOutcome::Updated => RowOutcome::Updated,
        };

        if self.options.dry_run {
            report.outcome = outcome;
            report.objective = Some(reconciled.objective);
            return Ok(());
        }

        let saved = self.store.save_objective(&reconciled.objective).await?;
        report.outcome = outcome;
        report.objective = Some(saved.clone());

        let link = RelationshipLinker::new(self.store)
            .link_if_absent(&saved, &self.parent)
            .await?;
        report.linked = link.is_created();
        Ok(())
    }

    /// Header block of an export: metadata headings, metadata values, two
    /// blank lines, then the object headings. Lazy; call again to restart.
    pub fn export_headers(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        (0..FIRST_DATA_LINE - 1).map(move |index| match index {
            0 => self.metadata_map.labels().map(String::from).collect(),
            1 => vec![SHEET_TYPE.to_string(), self.parent.slug.clone()],
            4 => self.spec.labels().map(String::from).collect(),
            _ => Vec::new(),
        })
    }

    /// One line per objective, cells in object-heading order.
    pub fn export_rows<'o>(
        &'o self,
        objectives: &'o [Objective],
    ) -> impl Iterator<Item = Vec<String>> + 'o {
        objectives.iter().map(move |objective| {
            self.spec
                .directives()
                .iter()
                .map(|directive| self.export_cell(objective, directive.attr))
                .collect()
        })
    }

    fn export_cell(&self, objective: &Objective, attr: ObjectiveAttr) -> String {
        match attr {
            ObjectiveAttr::Slug => objective.slug.clone(),
            ObjectiveAttr::Title => objective.title.clone(),
            ObjectiveAttr::Description => objective.description.clone().unwrap_or_default(),
            ObjectiveAttr::Url => objective.url.clone().unwrap_or_default(),
            ObjectiveAttr::Notes => objective.notes.clone().unwrap_or_default(),
            ObjectiveAttr::CreatedAt => self.format_date(objective.created_at),
            ObjectiveAttr::UpdatedAt => self.format_date(objective.updated_at),
        }
    }

    fn format_date(&self, value: Option<DateTime<Utc>>) -> String {
        let Some(value) = value else {
            return String::new();
        };
        let mut out = String::new();
        if write!(out, "{}", value.format(&self.options.date_format)).is_err() {
            out = value.format(FALLBACK_DATE_FORMAT).to_string();
        }
        out
    }
}
