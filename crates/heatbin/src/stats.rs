//! Summary statistics of a filled grid.

use serde::Serialize;

use crate::SquareGrid;

/// Cell count extrema, also expressed as a percentage of the dataset's
/// unique particle count.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridStats {
    pub total_cells: usize,
    pub occupied_cells: usize,
    /// Smallest non-zero cell count.
    pub min_count: u32,
    pub max_count: u32,
    pub min_percent: f64,
    pub max_percent: f64,
    pub binned_points: usize,
    pub skipped_points: usize,
}

impl GridStats {
    pub(crate) fn compute(
        grid: &SquareGrid,
        binned_points: usize,
        skipped_points: usize,
        unique_particles: usize,
    ) -> Self {
        let mut occupied_cells = 0usize;
        let mut min_count = u32::MAX;
        let mut max_count = 0u32;
        for cell in grid.occupied() {
            occupied_cells += 1;
            min_count = min_count.min(cell.count);
            max_count = max_count.max(cell.count);
        }
        if occupied_cells == 0 {
            min_count = 0;
        }

        let percent = |count: u32| {
            if unique_particles == 0 {
                0.0
            } else {
                count as f64 / unique_particles as f64 * 100.0
            }
        };

        Self {
            total_cells: grid.total_cells(),
            occupied_cells,
            min_count,
            max_count,
            min_percent: percent(min_count),
            max_percent: percent(max_count),
            binned_points,
            skipped_points,
        }
    }
}
