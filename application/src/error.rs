use std::io;
use thiserror::Error;

use domain::error::DomainError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Decode error: {message}")]
    DecodeError { message: String },

    #[error("Processing error: {message}")]
    ProcessingError { message: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("Task error: {message}")]
    TaskError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl AppError {
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::DecodeError { .. })
    }

    /// Failures caused by the bytes of the blob itself. Retrying the same
    /// content cannot succeed; storage, I/O and task failures may.
    #[must_use]
    pub fn is_content_failure(&self) -> bool {
        matches!(
            self,
            Self::Domain(_) | Self::DecodeError { .. } | Self::ProcessingError { .. }
        )
    }
}


pub type AppResult<T> = Result<T, AppError>;
