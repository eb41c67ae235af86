//! Common types and utilities shared across the particle-dispersion crates.

pub mod bbox;
pub mod color;
pub mod error;
pub mod latlng;
pub mod scale;
pub mod time;

pub use bbox::BoundingBox;
pub use color::Color;
pub use error::{DispersionError, DispersionResult};
pub use latlng::LatLng;
pub use scale::{ColorScale, ColorScaleError};
pub use time::{parse_step_key, TimeParseError};
