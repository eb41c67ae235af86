//! Display modes.

use std::fmt;
use std::str::FromStr;

use particle_data::Field;
use serde::{Deserialize, Serialize};

use crate::LayerError;

/// What the layer renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum DisplayMode {
    /// Heatmap of each particle's last known position.
    Final,
    /// Heatmap of every particle occurrence across all steps.
    Exposure,
    /// Markers for a single step, colored by age.
    Keyframe,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 3] = [Self::Final, Self::Exposure, Self::Keyframe];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Final => "FINAL",
            Self::Exposure => "EXPOSURE",
            Self::Keyframe => "KEYFRAME",
        }
    }

    /// Record fields that must have distinct positions for this mode.
    pub fn required_fields(&self) -> &'static [Field] {
        match self {
            Self::Keyframe => &[Field::Latitude, Field::Longitude, Field::Age],
            Self::Final | Self::Exposure => &[Field::Id, Field::Latitude, Field::Longitude],
        }
    }

    /// Whether this mode renders through the heatmap renderer.
    pub fn is_heatmap(&self) -> bool {
        matches!(self, Self::Final | Self::Exposure)
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = LayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FINAL" => Ok(Self::Final),
            "EXPOSURE" => Ok(Self::Exposure),
            "KEYFRAME" => Ok(Self::Keyframe),
            _ => Err(LayerError::invalid_mode(s)),
        }
    }
}

impl TryFrom<String> for DisplayMode {
    type Error = LayerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
