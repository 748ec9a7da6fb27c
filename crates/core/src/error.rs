//! Domain error type shared by all layers.

use crate::types::DbId;

/// Domain-level errors raised by core guard functions and surfaced by the
/// repository and HTTP layers.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Structural input problem (bad dates, missing reason, margin out of
    /// range, unknown enum value). Message is per-field and user-facing.
    #[error("{0}")]
    Validation(String),

    /// The record is not in the status required by the requested action.
    ///
    /// Carries the expected-vs-actual statuses so callers can explain why
    /// the action is currently unavailable.
    #[error("not in the correct status for {action}: expected {expected}, current status is '{actual}'")]
    InvalidStateTransition {
        action: &'static str,
        expected: &'static str,
        actual: String,
    },

    /// Missing or invalid credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated, but not allowed to perform this action. Deliberately
    /// carries no status detail so unauthorized callers learn nothing about
    /// which transitions would be valid.
    #[error("{0}")]
    Forbidden(String),

    /// Conflicting concurrent update or duplicate record.
    #[error("{0}")]
    Conflict(String),

    /// Unexpected internal failure. Sanitized before reaching clients.
    #[error("{0}")]
    Internal(String),
}
