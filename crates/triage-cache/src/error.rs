use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupt record at {namespace}: {reason}")]
    Corrupt { namespace: String, reason: String },
}

pub type Result<T> = std::result::Result<T, CacheError>;
