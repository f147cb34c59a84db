use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// The outbound model call could not be completed (network, auth, quota).
    #[error("Transport error: {0}")]
    Transport(String),

    /// A response arrived but does not fit the declared shape.
    #[error("Schema validation error: {0}")]
    SchemaValidation(String),

    /// Nothing to send; raised before any outbound call is made.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DomainError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn schema_validation(msg: impl Into<String>) -> Self {
        Self::SchemaValidation(msg.into())
    }

    pub fn empty_input(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub fn is_schema_validation(&self) -> bool {
        matches!(self, Self::SchemaValidation(_))
    }

    pub fn is_empty_input(&self) -> bool {
        matches!(self, Self::EmptyInput(_))
    }
}
