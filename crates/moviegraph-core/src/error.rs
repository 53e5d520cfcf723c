use thiserror::Error;

/// Top-level error type for MovieGraph configuration and input handling.
#[derive(Error, Debug)]
pub enum MovieGraphError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for MovieGraphError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
