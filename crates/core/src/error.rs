use crate::types::DbId;

/// Domain-level error taxonomy shared by every layer.
///
/// `Validation` covers malformed input values, `Conflict` covers
/// state-machine guard failures and uniqueness collisions. Both are
/// recoverable, user-facing business errors; `Internal` is the only variant
/// whose message must never reach a client verbatim.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
