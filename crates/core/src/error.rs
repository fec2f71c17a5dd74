/// Domain error taxonomy shared across the workspace.
///
/// The API layer maps each variant onto an HTTP status; see
/// `pitboss-api`'s `AppError`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// Operation is illegal for the entity's current status, e.g. calling
    /// an already-seated waitlist entry.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A (table, seat) pair already has an active occupant.
    #[error("Seat occupied: {0}")]
    SeatOccupied(String),

    /// A time-windowed operation was attempted outside any session window.
    #[error("No active flush session")]
    NoActiveSession,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Too many failed authentication attempts from one source.
    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Convenience constructor for [`CoreError::NotFound`]; entities are
    /// looked up by id, card number, table number, or game key.
    pub fn not_found(entity: &'static str, key: impl std::fmt::Display) -> Self {
        CoreError::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}
