use thiserror::Error;

/// Errors that can occur while talking to the recipe service or the local cache
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Request could not be sent or its body could not be read
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Remote service answered with a non-success status
    #[error("Recipe service returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body did not have the expected envelope
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// No API key in configuration or environment
    #[error("SPOONACULAR_API_KEY not found in config or environment")]
    MissingApiKey,

    /// Category label outside the known set
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Reading or writing the snapshot file failed
    #[error("Cache error: {0}")]
    Cache(#[from] std::io::Error),

    /// JSON encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl RecipeError {
    /// Wraps a reqwest error after dropping its URL, which carries the API key.
    pub fn transport(err: reqwest::Error) -> Self {
        RecipeError::Transport(err.without_url())
    }

    /// True for failures of the HTTP round-trip itself (network or status).
    pub fn is_transport(&self) -> bool {
        matches!(self, RecipeError::Transport(_) | RecipeError::Status { .. })
    }
}
