use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),
}

impl CoreError {
    pub fn invalid(field: &str, reason: &str) -> Self {
        CoreError::InvalidInput(field.to_string(), reason.to_string())
    }
}
