use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error taxonomy for the scheduling engine.
///
/// Every variant maps to a distinguishing code in the web layer; nothing is
/// swallowed. Mutating operations return before touching the store on
/// `Validation`, `InsufficientParticipants` and `NotFound`.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("not enough active participants (found {active}, need at least 2)")]
    InsufficientParticipants { active: usize },

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("inconsistent match state: {0}")]
    Consistency(String),

    #[error("operation not allowed for this role")]
    Forbidden,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl ServiceError {
    /// Stable machine-readable code, surfaced in API responses.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "VALIDATION",
            ServiceError::InsufficientParticipants { .. } => "INSUFFICIENT_PARTICIPANTS",
            ServiceError::NotFound(_) => "NOT_FOUND",
            ServiceError::Consistency(_) => "CONSISTENCY_VIOLATION",
            ServiceError::Forbidden => "FORBIDDEN",
            ServiceError::Database(_) => "INTERNAL",
        }
    }
}
