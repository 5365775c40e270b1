//! Entity structs for all GRC import domain objects.
//!
//! Each entity maps to a table in the libSQL store (see `grc-db` migrations).
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! roundtrip and schema validation.

mod audit;
mod governance;
mod object_objective;
mod objective;

pub use audit::AuditEntry;
pub use governance::{GovernanceObject, ParentContext};
pub use object_objective::{NewAssociation, ObjectObjective};
pub use objective::Objective;
