use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrbtimeError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("API request to {url} failed with status {status}")]
    Api {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Issue {issue} is missing expected field '{field}'")]
    MissingField { issue: String, field: String },

    #[error("Issue {issue} has an unparsable timestamp in '{field}': {value}")]
    Timestamp {
        issue: String,
        field: String,
        value: String,
    },

    #[error("Malformed table: {0}")]
    Table(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PrbtimeError>;
