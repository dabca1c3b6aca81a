use thiserror::Error;

#[derive(Error, Debug)]
pub enum PollerError {
    #[error("Invalid transaction handle: {0}")]
    InvalidHandle(String),
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Status endpoint returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Status source error: {0}")]
    Source(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Polling cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, PollerError>;
