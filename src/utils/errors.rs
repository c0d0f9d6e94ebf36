use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Playback error: {0}")]
    Playback(String),

    #[error("Content error: {0}")]
    Content(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
