use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Role or ownership check failed. The message is for logs only and is
    /// never sent to the caller.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The persistence backend is unavailable. Safe to retry.
    #[error("Store unavailable: {0}")]
    TransientStore(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        CoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn complaint_not_found(id: DbId) -> Self {
        Self::not_found("Complaint", id)
    }
}
