use std::io;

#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error("invalid handle: {0:?} (letters, digits, underscore; 1-15 chars)")]
    InvalidHandle(String),
    #[error("account not found: @{0}")]
    NotFound(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("timeout")]
    Timeout,
    #[error("http error: {0}")]
    Http(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("provider error: {0}")]
    Provider(String),
    #[error("malformed payload: {0}")]
    Payload(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<reqwest::Error> for DetectError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DetectError::Timeout
        } else if err.is_connect() {
            DetectError::Network(err.to_string())
        } else if err.is_status() {
            DetectError::Http(err.to_string())
        } else {
            DetectError::Provider(err.to_string())
        }
    }
}
