use thiserror::Error;

#[derive(Debug, Error)]
pub enum OiError {
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Persona not found: {0}")]
    PersonaNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, OiError>;
