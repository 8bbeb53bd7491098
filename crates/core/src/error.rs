use crate::validation::FieldError;

/// Failure kinds shared by every entity operation.
///
/// Each variant maps to exactly one transport status and error code.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} with id {id} already exists")]
    AlreadyExists { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Category {0} does not exist")]
    CategoryNotFound(crate::types::DbId),

    /// The caller does not own the targeted row.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Administrator privileges required to {0}")]
    AdminRequired(String),

    /// Missing or invalid credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn already_exists(entity: &'static str, id: impl ToString) -> Self {
        Self::AlreadyExists {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<FieldError> for CoreError {
    fn from(err: FieldError) -> Self {
        Self::Validation(err.to_string())
    }
}
