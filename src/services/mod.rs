use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod import;
pub mod products;

/// Convenience alias for service operation results.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the service layer to its callers.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The requested entity does not exist.
    #[error("entity not found")]
    NotFound,
    /// The caller supplied pagination parameters outside the contract.
    #[error("invalid query: {0}")]
    InvalidQuery(&'static str),
    /// The submitted payload failed validation.
    #[error("invalid payload: {0}")]
    Form(String),
    /// The persistence layer failed.
    #[error("repository error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}
