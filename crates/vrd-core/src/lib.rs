//! # vrd-core
//!
//! Core types and rules shared by every Verdict crate.
//!
//! - Entity structs for the backend's domain objects (suites, cases, runs,
//!   results, documents, chat sessions)
//! - Status and verdict enums with transition tables
//! - The wire-mapping layer: request payloads and the lenient timestamp codec
//!   that convert between backend JSON and the typed entities
//! - Pass-rate, progress, and favorite-ordering rules
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod favorites;
pub mod scoring;
pub mod wire;
