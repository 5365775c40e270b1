//! In-memory store used by the pipeline's unit tests.

use std::sync::Mutex;

use chrono::Utc;
use grc_core::entities::{GovernanceObject, NewAssociation, ObjectObjective, Objective};
use grc_core::enums::ParentKind;
use grc_core::errors::StoreError;
use grc_core::ports::{AssociationStore, ObjectiveStore, ParentLookup};

#[derive(Default)]
struct State {
    objectives: Vec<Objective>,
    parents: Vec<GovernanceObject>,
    associations: Vec<ObjectObjective>,
    fail_lookups: bool,
    fail_save_slug: Option<String>,
    fail_links: bool,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

pub fn parent(kind: ParentKind, id: i64, slug: &str) -> GovernanceObject {
    let now = Utc::now();
    GovernanceObject {
        id,
        kind,
        slug: slug.to_string(),
        title: format!("{kind} {slug}"),
        created_at: now,
        updated_at: now,
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(self, parent: GovernanceObject) -> Self {
        self.state.lock().unwrap().parents.push(parent);
        self
    }

    /// Store an objective directly, bypassing the pipeline.
    pub fn seed_objective(&self, objective: Objective) -> Objective {
        let mut state = self.state.lock().unwrap();
        insert(&mut state, objective)
    }

    pub fn objectives(&self) -> Vec<Objective> {
        self.state.lock().unwrap().objectives.clone()
    }

    pub fn associations(&self) -> Vec<ObjectObjective> {
        self.state.lock().unwrap().associations.clone()
    }

    pub fn fail_lookups(&self) {
        self.state.lock().unwrap().fail_lookups = true;
    }

    pub fn fail_save_of(&self, slug: &str) {
        self.state.lock().unwrap().fail_save_slug = Some(slug.to_string());
    }

    pub fn fail_links(&self) {
        self.state.lock().unwrap().fail_links = true;
    }
}

fn insert(state: &mut State, mut objective: Objective) -> Objective {
    let now = Utc::now();
    objective.id = Some(i64::try_from(state.objectives.len()).unwrap() + 1);
    objective.created_at = Some(now);
    objective.updated_at = Some(now);
    state.objectives.push(objective.clone());
    objective
}

impl ObjectiveStore for MemoryStore {
    async fn find_objective_by_slug(&self, slug: &str) -> Result<Option<Objective>, StoreError> {
        let state = self.state.lock().unwrap();
        if state.fail_lookups {
            return Err(StoreError::msg("lookup unavailable"));
        }
        Ok(state.objectives.iter().find(|o| o.slug == slug).cloned())
    }

    async fn save_objective(&self, objective: &Objective) -> Result<Objective, StoreError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_save_slug.as_deref() == Some(objective.slug.as_str()) {
            return Err(StoreError::msg(format!("cannot save {}", objective.slug)));
        }
        match objective.id {
            None => Ok(insert(&mut state, objective.clone())),
            Some(id) => {
                let stored = state
                    .objectives
                    .iter_mut()
                    .find(|o| o.id == Some(id))
                    .ok_or_else(|| StoreError::msg(format!("no objective {id}")))?;
                *stored = Objective {
                    updated_at: Some(Utc::now()),
                    ..objective.clone()
                };
                Ok(stored.clone())
            }
        }
    }
}

impl ParentLookup for MemoryStore {
    async fn lookup_parent(
        &self,
        kind: ParentKind,
        id: i64,
    ) -> Result<Option<GovernanceObject>, StoreError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .parents
            .iter()
            .find(|p| p.kind == kind && p.id == id)
            .cloned())
    }
}

impl AssociationStore for MemoryStore {
    async fn count_associations(
        &self,
        owner_type: &str,
        owner_id: i64,
        objective_id: i64,
    ) -> Result<u64, StoreError> {
        let state = self.state.lock().unwrap();
        let count = state
            .associations
            .iter()
            .filter(|a| {
                a.owner_type == owner_type
                    && a.owner_id == owner_id
                    && a.objective_id == objective_id
            })
            .count();
        Ok(count as u64)
    }

    async fn create_association(
        &self,
        association: &NewAssociation,
    ) -> Result<ObjectObjective, StoreError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_links {
            return Err(StoreError::msg(format!(
                "cannot link objective {}",
                association.objective_id
            )));
        }
        let created = ObjectObjective {
            id: i64::try_from(state.associations.len()).unwrap() + 1,
            owner_type: association.owner_type.clone(),
            owner_id: association.owner_id,
            objective_id: association.objective_id,
            created_at: Utc::now(),
        };
        state.associations.push(created.clone());
        Ok(created)
    }
}
