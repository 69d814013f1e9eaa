use thiserror::Error;

/// Errors that can occur during recipe lookup and upload operations
#[derive(Error, Debug)]
pub enum LookupError {
    /// The request lost the race against the fixed timeout
    #[error("Request took too long! Timeout after {0} seconds")]
    Timeout(u64),

    /// Transport succeeded but the server answered with a non-success status.
    /// Carries the server-supplied message so callers can present it.
    #[error("{message} ({status})")]
    RemoteRejection { status: u16, message: String },

    /// An uploaded ingredient value did not split into exactly
    /// quantity, unit and description
    #[error("Wrong ingredient format: {0:?} (expected \"quantity,unit,description\")")]
    MalformedIngredient(String),

    /// HTTP transport failure
    #[error("Failed to fetch URL: {0}")]
    Http(#[from] reqwest::Error),

    /// Wire payload could not be decoded
    #[error("Failed to decode response: {0}")]
    Json(#[from] serde_json::Error),

    /// Bookmark record could not be read or written
    #[error("Persistence error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
