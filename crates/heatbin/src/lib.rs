//! Spatial grid binning for dense particle heatmaps.
//!
//! Instead of handing every point to a kernel heatmap renderer, points are
//! tallied into square cells of a fixed real-world edge length and each
//! occupied cell is emitted once at its centroid with its count as weight.
//!
//! # Grid layout
//!
//! The grid origin is the bottom-right (south-east) corner of the bounding
//! box. Columns count westward from the east edge and rows northward from
//! the south edge; the flattened index is `column * rows + row`.
//!
//! Distances are great-circle (haversine) kilometres throughout.

pub mod binner;
pub mod config;
pub mod error;
pub mod geodesy;
pub mod grid;
pub mod stats;

pub use binner::{BinnedGrid, HeatBinner};
pub use config::HeatBinConfig;
pub use error::{HeatBinError, Result};
pub use grid::{GridCell, SquareGrid};
pub use stats::GridStats;
