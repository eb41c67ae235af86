//! Error types for aggregation.

use thiserror::Error;

/// Errors that can occur while aggregating a dataset.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AggregationError {
    /// Positional frame lookup past the last step.
    #[error("no such frame: index {index} but dataset has {frame_count} frames")]
    FrameOutOfRange { index: usize, frame_count: usize },
}

/// Result type for aggregation operations.
pub type Result<T> = std::result::Result<T, AggregationError>;
