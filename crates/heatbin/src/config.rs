//! Configuration for grid binning.

use serde::{Deserialize, Serialize};

use crate::{HeatBinError, Result};

/// Grid binning settings, the `heatBin` block of heat options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeatBinConfig {
    /// Bin points instead of handing them to the renderer directly.
    pub enabled: bool,

    /// Cell edge length in kilometres.
    pub cell_size_km: f64,

    /// Multiplier applied to the largest cell count to derive the
    /// renderer's maximum.
    pub max_factor: f64,

    /// Also hand the grid outlines to the renderer.
    pub show_bin_grid: bool,

    /// Upper bound on `columns * rows`.
    pub max_cells: usize,
}

impl Default for HeatBinConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            cell_size_km: 1.0,
            max_factor: 1.0,
            show_bin_grid: false,
            max_cells: 4_000_000,
        }
    }
}

impl HeatBinConfig {
    /// Binning enabled with the given cell size.
    pub fn with_cell_size_km(cell_size_km: f64) -> Self {
        Self {
            enabled: true,
            cell_size_km,
            ..Self::default()
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.cell_size_km.is_finite() || self.cell_size_km <= 0.0 {
            return Err(HeatBinError::InvalidCellSize(self.cell_size_km));
        }
        Ok(())
    }

    /// `max_factor` with non-positive or non-finite values treated as 1.
    pub fn effective_max_factor(&self) -> f64 {
        if self.max_factor.is_finite() && self.max_factor > 0.0 {
            self.max_factor
        } else {
            1.0
        }
    }
}
