//! # grc-core
//!
//! Core types, ID prefixes, store ports, and error types for GRC imports.
//!
//! This crate provides the foundational types shared across all GRC crates:
//! - Entity structs for objectives, governance objects (policies, regulations,
//!   contracts, standards, ...), objective associations, and audit entries
//! - Closed enums for parent kinds, objective attributes, and audit actions
//! - ID prefix constants for generated identifiers
//! - Cross-cutting error types
//! - Port traits the import pipeline consumes and the store implements
//! - Audit detail sub-types

pub mod audit_detail;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod ports;
