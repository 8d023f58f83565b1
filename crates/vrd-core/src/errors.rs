//! Cross-cutting error types for Verdict.
//!
//! Transport errors live in `vrd-client` and orchestration errors in
//! `vrd-runner`; this module only covers violations of the domain rules.

use thiserror::Error;

/// Errors raised by domain rules in `vrd-core`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// Data failed validation (index out of range, malformed input).
    #[error("Validation error: {0}")]
    Validation(String),
}
