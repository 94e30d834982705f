// src/errors.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TutorError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logger error: {0}")]
    Logger(#[from] flexi_logger::FlexiLoggerError),
}

impl TutorError {
    pub fn api_error(msg: impl Into<String>) -> Self {
        TutorError::Api(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        TutorError::Config(msg.into())
    }
}

pub type TutorResult<T> = Result<T, TutorError>;
