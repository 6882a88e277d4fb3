//! Error types for spendlens

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Network failure: {0}")]
    Network(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Nothing to export: no expenses recorded")]
    NothingToExport,
}

/// Coarse failure classes callers branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Remote unreachable, or a non-2xx response without record semantics
    NetworkFailure,
    /// The targeted record does not exist remotely
    NotFound,
    /// Input rejected before reaching the remote store
    ValidationFailure,
    /// Local I/O, config or export problems
    Local,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) | Self::Http(_) | Self::Json(_) => ErrorKind::NetworkFailure,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Validation(_) => ErrorKind::ValidationFailure,
            Self::Io(_) | Self::Config(_) | Self::NothingToExport => ErrorKind::Local,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

pub type Result<T> = std::result::Result<T, Error>;
