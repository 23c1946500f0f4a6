use models::errors::ModelError;
use thiserror::Error;

pub const DUPLICATE_EMAIL: &str = "Email already exists";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("Email already exists")]
    DuplicateEmail,
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(errors) => Self::Validation(errors),
            ModelError::Db(msg) => Self::Db(msg),
        }
    }
}
