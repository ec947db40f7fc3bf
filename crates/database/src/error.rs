use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// Typed failures surfaced by every service operation. A rejected operation
/// leaves all entities unmodified.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{entity} not found with id: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("batch capacity exceeded: {0}")]
    CapacityExceeded(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invalid state: {0}")]
    State(String),

    #[error(transparent)]
    Db(#[from] DbErr),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
