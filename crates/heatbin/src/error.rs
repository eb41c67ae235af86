//! Error types for grid binning.

use thiserror::Error;

/// Errors that can occur while building or filling a grid.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HeatBinError {
    /// Cell edge length must be a positive, finite number of kilometres.
    #[error("invalid cell size: {0} km")]
    InvalidCellSize(f64),

    /// Bounding box has non-finite or inverted edges.
    #[error("invalid bounding box: {0}")]
    InvalidBounds(String),

    /// The grid would exceed the configured cell budget.
    #[error("grid of {columns}x{rows} cells exceeds limit of {limit}")]
    TooManyCells {
        columns: usize,
        rows: usize,
        limit: usize,
    },

    /// No finite points to derive a bounding box from.
    #[error("cannot bin an empty point cloud")]
    EmptyCloud,
}

impl HeatBinError {
    pub fn invalid_bounds(msg: impl Into<String>) -> Self {
        Self::InvalidBounds(msg.into())
    }
}

/// Result type for binning operations.
pub type Result<T> = std::result::Result<T, HeatBinError>;
