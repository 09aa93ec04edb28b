use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid blob name: {0}")]
    InvalidBlobName(String),

    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid target width: {0}")]
    InvalidTargetWidth(u32),

    #[error("Thumbnail height overflows for a {width}x{height} source")]
    DimensionOverflow { width: u32, height: u32 },

    #[error("Raster length mismatch: expected {expected} bytes, got {actual}")]
    RasterLengthMismatch { expected: usize, actual: usize },
}

pub type DomainResult<T> = Result<T, DomainError>;
