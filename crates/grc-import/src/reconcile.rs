//! Create-or-update decision for a validated row.

use grc_core::entities::Objective;
use grc_core::errors::StoreError;
use grc_core::ports::ObjectiveStore;
use serde::Serialize;
use tracing::debug;

use crate::mapper::ValidatedObjective;
use crate::report::RowMessage;

pub const ALREADY_EXISTS: &str = "Objective already exists and will be updated";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcileOutcome {
    Created,
    Updated,
}

/// The objective to persist and how it relates to what the store had.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reconciled {
    pub objective: Objective,
    pub outcome: ReconcileOutcome,
    pub warnings: Vec<RowMessage>,
}

/// Resolves validated rows against existing objectives by slug.
pub struct Reconciler<'a, S> {
    store: &'a S,
    slug_label: &'a str,
}

impl<'a, S: ObjectiveStore> Reconciler<'a, S> {
    /// `slug_label` is the heading warnings are attached to.
    pub const fn new(store: &'a S, slug_label: &'a str) -> Self {
        Self { store, slug_label }
    }

    /// Build the objective a row describes.
    ///
    /// An existing objective keeps its id, slug, and creation time and takes
    /// every mutable field from `values`. Nothing is written here.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the slug lookup fails.
    pub async fn reconcile(&self, values: ValidatedObjective) -> Result<Reconciled, StoreError> {
        let existing = self.store.find_objective_by_slug(&values.slug).await?;
        let reconciled = match existing {
            Some(mut objective) => {
                debug!(slug = %values.slug, id = ?objective.id, "objective exists, updating");
                objective.title = values.title;
                objective.description = values.description;
                objective.url = values.url;
                objective.notes = values.notes;
                Reconciled {
                    objective,
                    outcome: ReconcileOutcome::Updated,
                    warnings: vec![RowMessage::new(self.slug_label, ALREADY_EXISTS)],
                }
            }
            None => {
                debug!(slug = %values.slug, "new objective");
                Reconciled {
                    objective: Objective {
                        description: values.description,
                        url: values.url,
                        notes: values.notes,
                        ..Objective::new(values.slug, values.title)
                    },
                    outcome: ReconcileOutcome::Created,
                    warnings: Vec::new(),
                }
            }
        };
        Ok(reconciled)
    }
}
