use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Missing credential: set the {0} environment variable")]
    MissingCredential(&'static str),
    #[error("Provider error (status {status}): {message}")]
    Provider { status: u16, message: String },
    #[error("Schema violation in record {index}: {reason}")]
    Schema { index: usize, reason: String },
    #[error("Search query is empty")]
    EmptyQuery,
    #[error("{0}")]
    Dashboard(String),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
