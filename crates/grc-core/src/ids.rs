//! ID prefix constants.
//!
//! Objectives, governance objects, and associations use integer keys assigned
//! by the store. Audit entries use prefixed random IDs such as `aud-3f9a01bc`.

pub const PREFIX_AUDIT: &str = "aud";

/// All prefixes, in declaration order.
pub const ALL_PREFIXES: &[&str] = &[PREFIX_AUDIT];
