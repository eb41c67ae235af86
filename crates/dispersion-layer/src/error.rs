//! Error types for the display layer.

use aggregation::AggregationError;
use dispersion_common::ColorScaleError;
use heatbin::HeatBinError;
use particle_data::DataFormatError;
use thiserror::Error;

use crate::DisplayMode;

/// Errors reported by [`crate::ParticleDispersionLayer`].
///
/// Every error leaves the layer in a consistent state: at worst an empty
/// display with no rendered layer attached.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayerError {
    #[error("Invalid display mode: {0}")]
    InvalidMode(String),

    #[error("Invalid data format for {mode} mode: {source}")]
    InvalidDataFormat {
        mode: DisplayMode,
        #[source]
        source: DataFormatError,
    },

    #[error("Invalid color scale: {0}")]
    ColorScale(#[from] ColorScaleError),

    #[error("Grid binning failed: {0}")]
    HeatBin(#[from] HeatBinError),

    #[error("Missing data: {0}")]
    MissingData(String),

    #[error("Layer is not active")]
    Inactive,

    #[error("Layer is already active")]
    AlreadyActive,

    #[error("Operation requires {expected} mode, current mode is {current:?}")]
    WrongMode {
        expected: DisplayMode,
        current: Option<DisplayMode>,
    },

    #[error("no such frame: index {index} but dataset has {frame_count} frames")]
    FrameOutOfRange { index: usize, frame_count: usize },
}

impl LayerError {
    pub fn missing_data(msg: impl Into<String>) -> Self {
        Self::MissingData(msg.into())
    }

    pub fn invalid_mode(mode: impl Into<String>) -> Self {
        Self::InvalidMode(mode.into())
    }
}

impl From<AggregationError> for LayerError {
    fn from(err: AggregationError) -> Self {
        match err {
            AggregationError::FrameOutOfRange { index, frame_count } => {
                Self::FrameOutOfRange { index, frame_count }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, LayerError>;
