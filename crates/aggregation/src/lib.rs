//! Aggregation of particle snapshots into display records.
//!
//! Three independent, side-effect free transformations:
//! - [`final_positions`]: last known position of every particle
//! - [`exposure`]: one weighted point per particle occurrence
//! - [`keyframe`]: a single step projected to colored markers

pub mod error;
pub mod exposure;
pub mod final_position;
pub mod keyframe;
pub mod types;

pub use error::{AggregationError, Result};
pub use exposure::exposure;
pub use final_position::{final_position_of, final_positions};
pub use keyframe::{keyframe, Keyframe, KeyframeRecord};
pub use types::{HeatPoint, HeatmapPayload};
