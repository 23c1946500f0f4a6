use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// Every field-level problem found, in field order.
    #[error("validation error: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("database error: {0}")]
    Db(String),
}
