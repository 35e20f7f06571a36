use std::sync::Arc;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum XccleanError {
    #[error("I/O Error: {0}")]
    Io(#[from] Arc<std::io::Error>),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] Arc<serde_json::Error>),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Scan Error: {0}")]
    Scan(String),

    #[error("Clean Error: {0}")]
    Clean(String),

    #[error("Refusing to touch {0}: outside the managed storage roots")]
    UnsafePath(String),

    #[error("Resource Not Found: {0}")]
    NotFound(String),

    #[error("Generic Error: {0}")]
    Generic(String),
}

impl From<std::io::Error> for XccleanError {
    fn from(err: std::io::Error) -> Self {
        XccleanError::Io(Arc::new(err))
    }
}

impl From<serde_json::Error> for XccleanError {
    fn from(err: serde_json::Error) -> Self {
        XccleanError::Json(Arc::new(err))
    }
}

pub type Result<T> = std::result::Result<T, XccleanError>;
