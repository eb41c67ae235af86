//! Tallying points into grid cells.

use aggregation::{HeatPoint, HeatmapPayload};
use dispersion_common::{BoundingBox, LatLng};
use tracing::{debug, info};

use crate::{GridStats, HeatBinConfig, HeatBinError, Result, SquareGrid};

/// Bins point clouds according to a [`HeatBinConfig`].
#[derive(Debug, Clone)]
pub struct HeatBinner {
    config: HeatBinConfig,
}

impl HeatBinner {
    pub fn new(config: HeatBinConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &HeatBinConfig {
        &self.config
    }

    /// Bin `points` over their own bounding box.
    pub fn bin<I>(&self, points: I) -> Result<BinnedGrid>
    where
        I: IntoIterator<Item = LatLng>,
    {
        let points: Vec<LatLng> = points.into_iter().collect();
        let bounds = BoundingBox::from_points(points.iter().copied()).ok_or(HeatBinError::EmptyCloud)?;
        self.bin_within(bounds, points)
    }

    /// Bin `points` over an explicit bounding box. Points outside it are
    /// counted as skipped.
    pub fn bin_within<I>(&self, bounds: BoundingBox, points: I) -> Result<BinnedGrid>
    where
        I: IntoIterator<Item = LatLng>,
    {
        let mut grid = SquareGrid::new(bounds, self.config.cell_size_km, self.config.max_cells)?;
        debug!(
            columns = grid.columns(),
            rows = grid.rows(),
            cell_size_km = grid.cell_size_km(),
            "Created binning grid"
        );

        let mut binned = 0usize;
        let mut skipped = 0usize;
        for p in points {
            match grid.index_of(p) {
                Some(index) => {
                    grid.increment(index);
                    binned += 1;
                }
                None => skipped += 1,
            }
        }

        info!(
            binned,
            skipped,
            total_cells = grid.total_cells(),
            occupied = grid.occupied().count(),
            "Binned points into grid"
        );

        Ok(BinnedGrid {
            grid,
            binned,
            skipped,
            max_factor: self.config.effective_max_factor(),
        })
    }
}

/// A grid after binning.
#[derive(Debug, Clone)]
pub struct BinnedGrid {
    grid: SquareGrid,
    binned: usize,
    skipped: usize,
    max_factor: f64,
}

impl BinnedGrid {
    pub fn grid(&self) -> &SquareGrid {
        &self.grid
    }

    pub fn binned_points(&self) -> usize {
        self.binned
    }

    pub fn skipped_points(&self) -> usize {
        self.skipped
    }

    /// Sum of every cell count.
    pub fn total_count(&self) -> u64 {
        self.grid.cells().iter().map(|c| c.count as u64).sum()
    }

    /// One point per occupied cell at its centroid, weighted by the raw
    /// count.
    pub fn heat_points(&self) -> Vec<HeatPoint> {
        self.grid
            .occupied()
            .map(|cell| HeatPoint::at(cell.centroid(), cell.count as f64))
            .collect()
    }

    /// Renderer payload: `min` is the smallest occupied count and `max` the
    /// largest count scaled by the configured max factor.
    pub fn payload(&self) -> HeatmapPayload {
        let data = self.heat_points();
        let min = data.iter().map(|p| p.value).fold(f64::INFINITY, f64::min);
        let max = data.iter().map(|p| p.value).fold(0.0, f64::max);
        let min = if min.is_finite() { min } else { 0.0 };
        HeatmapPayload::new(min, max * self.max_factor, data)
    }

    /// Closed outline rings of every cell, for debug overlays.
    pub fn outlines(&self) -> Vec<Vec<LatLng>> {
        self.grid
            .cells()
            .iter()
            .map(|cell| cell.polygon.to_vec())
            .collect()
    }

    pub fn stats(&self, unique_particles: usize) -> GridStats {
        GridStats::compute(&self.grid, self.binned, self.skipped, unique_particles)
    }
}
