//! Square grids anchored at the south-east corner of a bounding box.

use dispersion_common::{BoundingBox, LatLng};
use serde::Serialize;

use crate::geodesy::{haversine_km, km_to_lat_degrees, km_to_lng_degrees};
use crate::{HeatBinError, Result};

/// Axis lengths within this fraction of a whole cell do not add a cell.
const CELL_TOLERANCE: f64 = 1e-9;

/// One grid cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    /// Flattened index, `column * rows + row`.
    pub index: usize,
    /// Column counted westward from the east edge.
    pub column: usize,
    /// Row counted northward from the south edge.
    pub row: usize,
    /// Closed ring: south-east, south-west, north-west, north-east,
    /// south-east.
    pub polygon: [LatLng; 5],
    pub count: u32,
}

impl GridCell {
    /// Mean of the four corners.
    pub fn centroid(&self) -> LatLng {
        let corners = &self.polygon[..4];
        let n = corners.len() as f64;
        LatLng::new(
            corners.iter().map(|p| p.lat).sum::<f64>() / n,
            corners.iter().map(|p| p.lng).sum::<f64>() / n,
        )
    }
}

/// A regular grid of square cells covering a bounding box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SquareGrid {
    bounds: BoundingBox,
    cell_size_km: f64,
    columns: usize,
    rows: usize,
    cells: Vec<GridCell>,
}

impl SquareGrid {
    /// Tile `bounds` with cells of `cell_size_km`.
    ///
    /// Cell counts per axis round up so the grid covers the whole box; a
    /// degenerate box still gets one cell.
    pub fn new(bounds: BoundingBox, cell_size_km: f64, max_cells: usize) -> Result<Self> {
        if !cell_size_km.is_finite() || cell_size_km <= 0.0 {
            return Err(HeatBinError::InvalidCellSize(cell_size_km));
        }
        let finite = [bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y]
            .iter()
            .all(|v| v.is_finite());
        if !finite || bounds.min_x > bounds.max_x || bounds.min_y > bounds.max_y {
            return Err(HeatBinError::invalid_bounds(format!("{:?}", bounds)));
        }

        // Columns must span the widest parallel in the box, which is the one
        // closest to the equator.
        let widest = 0.0_f64.clamp(bounds.south(), bounds.north());
        let width_km = haversine_km(
            LatLng::new(widest, bounds.west()),
            LatLng::new(widest, bounds.east()),
        );
        let height_km = haversine_km(bounds.south_west(), bounds.north_west());

        let columns = cells_along(width_km, cell_size_km);
        let rows = cells_along(height_km, cell_size_km);

        match columns.checked_mul(rows) {
            Some(total) if total <= max_cells => {}
            _ => {
                return Err(HeatBinError::TooManyCells {
                    columns,
                    rows,
                    limit: max_cells,
                })
            }
        }

        let cell_lat = km_to_lat_degrees(cell_size_km);
        let east = bounds.east();
        let south = bounds.south();
        let lng_at = |lat: f64, column: usize| east - km_to_lng_degrees(lat, column as f64 * cell_size_km);

        let mut cells = Vec::with_capacity(columns * rows);
        for column in 0..columns {
            for row in 0..rows {
                let lat_s = south + row as f64 * cell_lat;
                let lat_n = south + (row + 1) as f64 * cell_lat;
                let se = LatLng::new(lat_s, lng_at(lat_s, column));
                let sw = LatLng::new(lat_s, lng_at(lat_s, column + 1));
                let nw = LatLng::new(lat_n, lng_at(lat_n, column + 1));
                let ne = LatLng::new(lat_n, lng_at(lat_n, column));
                cells.push(GridCell {
                    index: column * rows + row,
                    column,
                    row,
                    polygon: [se, sw, nw, ne, se],
                    count: 0,
                });
            }
        }

        Ok(Self {
            bounds,
            cell_size_km,
            columns,
            rows,
            cells,
        })
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn cell_size_km(&self) -> f64 {
        self.cell_size_km
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&GridCell> {
        self.cells.get(index)
    }

    /// Flattened index of the cell holding `p`, or `None` when `p` lies
    /// outside the bounding box.
    ///
    /// Column and row come from the great-circle distance to the east and
    /// south edges. Both are clamped into the grid to absorb floating point
    /// overshoot at the far edges.
    pub fn index_of(&self, p: LatLng) -> Option<usize> {
        if !p.is_finite() || !self.bounds.contains(p) {
            return None;
        }

        let x_km = haversine_km(p, LatLng::new(p.lat, self.bounds.east()));
        let y_km = haversine_km(p, LatLng::new(self.bounds.south(), p.lng));

        let column = ((x_km / self.cell_size_km).floor() as usize).min(self.columns - 1);
        let row = ((y_km / self.cell_size_km).floor() as usize).min(self.rows - 1);

        Some((column * self.rows + row).min(self.cells.len() - 1))
    }

    /// Add one to the count of cell `index`.
    pub(crate) fn increment(&mut self, index: usize) {
        if let Some(cell) = self.cells.get_mut(index) {
            cell.count += 1;
        }
    }

    /// Cells with a non-zero count, in index order.
    pub fn occupied(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter().filter(|c| c.count > 0)
    }
}

fn cells_along(length_km: f64, cell_size_km: f64) -> usize {
    ((length_km / cell_size_km - CELL_TOLERANCE).ceil() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_km_box() -> BoundingBox {
        let side = km_to_lat_degrees(1.0);
        BoundingBox::new(0.0, 0.0, side, side)
    }

    #[test]
    fn test_one_km_box_half_km_cells() {
        let grid = SquareGrid::new(one_km_box(), 0.5, 1000).unwrap();
        assert_eq!(grid.columns(), 2);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.total_cells(), 4);
    }

    #[test]
    fn test_degenerate_box_has_one_cell() {
        let grid = SquareGrid::new(BoundingBox::new(5.0, 5.0, 5.0, 5.0), 0.25, 10).unwrap();
        assert_eq!(grid.total_cells(), 1);
        assert_eq!(grid.index_of(LatLng::new(5.0, 5.0)), Some(0));
    }

    #[test]
    fn test_origin_is_south_east() {
        let bounds = one_km_box();
        let grid = SquareGrid::new(bounds, 0.5, 1000).unwrap();

        let near_se = LatLng::new(bounds.south() + 1e-5, bounds.east() - 1e-5);
        let near_sw = LatLng::new(bounds.south() + 1e-5, bounds.west() + 1e-5);
        let near_ne = LatLng::new(bounds.north() - 1e-5, bounds.east() - 1e-5);

        assert_eq!(grid.index_of(near_se), Some(0));
        // column 1, row 0
        assert_eq!(grid.index_of(near_sw), Some(2));
        // column 0, row 1
        assert_eq!(grid.index_of(near_ne), Some(1));
    }

    #[test]
    fn test_far_corner_clamps_into_grid() {
        let bounds = one_km_box();
        let grid = SquareGrid::new(bounds, 0.5, 1000).unwrap();
        assert_eq!(grid.index_of(bounds.north_west()), Some(3));
    }

    #[test]
    fn test_outside_point_has_no_cell() {
        let grid = SquareGrid::new(one_km_box(), 0.5, 1000).unwrap();
        assert_eq!(grid.index_of(LatLng::new(-0.1, 0.001)), None);
        assert_eq!(grid.index_of(LatLng::new(f64::NAN, 0.001)), None);
    }

    #[test]
    fn test_cell_centroid_is_inside_cell() {
        let grid = SquareGrid::new(one_km_box(), 0.5, 1000).unwrap();
        for cell in grid.cells() {
            assert_eq!(grid.index_of(cell.centroid()), Some(cell.index));
        }
    }

    #[test]
    fn test_equator_crossing_box_measures_width_at_equator() {
        let bounds = BoundingBox::new(0.0, -60.0, 10.0, 60.0);
        let grid = SquareGrid::new(bounds, 50.0, 100_000).unwrap();

        let equator_km = haversine_km(LatLng::new(0.0, 0.0), LatLng::new(0.0, 10.0));
        assert_eq!(grid.columns(), (equator_km / 50.0).ceil() as usize);

        let p = LatLng::new(0.5, 0.1);
        let cell = grid.cell(grid.index_of(p).unwrap()).unwrap();
        let west = cell.polygon.iter().map(|c| c.lng).fold(f64::INFINITY, f64::min);
        let east = cell.polygon.iter().map(|c| c.lng).fold(f64::NEG_INFINITY, f64::max);
        assert!(west <= p.lng && p.lng <= east, "{:?}", cell.polygon);
    }

    #[test]
    fn test_too_many_cells() {
        let bounds = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(matches!(
            SquareGrid::new(bounds, 0.01, 1_000),
            Err(HeatBinError::TooManyCells { limit: 1_000, .. })
        ));
    }

    #[test]
    fn test_invalid_bounds() {
        let bounds = BoundingBox::new(1.0, 0.0, 0.0, 1.0);
        assert!(matches!(
            SquareGrid::new(bounds, 1.0, 1_000),
            Err(HeatBinError::InvalidBounds(_))
        ));
    }
}
