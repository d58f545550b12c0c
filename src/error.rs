use thiserror::Error;
use std::io;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid ignore pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Missing field: row {row} has no column {column}")]
    MissingField { row: usize, column: usize },

    #[error("Missing attribute: record {key:?} has no attribute {field}")]
    MissingAttribute { key: String, field: usize },

    #[error("Unknown key: {0}")]
    UnknownKey(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// Type alias for Result
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error conversions
impl Error {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    pub fn unknown_key<S: Into<String>>(key: S) -> Self {
        Error::UnknownKey(key.into())
    }

    pub fn missing_field(row: usize, column: usize) -> Self {
        Error::MissingField { row, column }
    }
}
