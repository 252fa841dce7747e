use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatInputError {
    /// The system message was neither a plain string nor a system-role message.
    #[error("Invalid system message: {0}")]
    InvalidSystemMessage(String),

    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// The configuration document could not be read or parsed.
    #[error("Configuration error: {0}")]
    Configuration(String),
}
