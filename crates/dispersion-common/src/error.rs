//! Error types shared by the particle-dispersion crates.

use thiserror::Error;

/// Result type alias using DispersionError.
pub type DispersionResult<T> = Result<T, DispersionError>;

/// Failure to load a particle dataset.
#[derive(Debug, Error)]
pub enum DispersionError {
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for DispersionError {
    fn from(err: std::io::Error) -> Self {
        DispersionError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DispersionError {
    fn from(err: serde_json::Error) -> Self {
        DispersionError::InvalidDataset(format!("JSON error: {}", err))
    }
}
