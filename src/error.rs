use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutoStarError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Search request failed with status code: {0}")]
    UnexpectedStatus(StatusCode),

    #[error("JSON decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to star repository {full_name}. Status Code: {status}")]
    StarRejected {
        full_name: String,
        status: StatusCode,
    },

    #[error("Invalid rate limit reset header: {0}")]
    ResetHeader(String),

    #[error("Invalid repository name: {0}")]
    InvalidRepoName(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, AutoStarError>;
