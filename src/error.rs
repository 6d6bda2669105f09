use thiserror::Error;

#[derive(Error, Debug)]
pub enum PsyLabError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    #[error("Invalid deck: '{0}' (expected one of A, B, C, D)")]
    InvalidDeck(String),

    #[error("Invalid condition: '{0}' (expected emotional, neutral or mixed)")]
    InvalidCondition(String),

    #[error("Unknown session: {0}")]
    UnknownSession(String),
}

pub type PlResult<T> = Result<T, PsyLabError>;
