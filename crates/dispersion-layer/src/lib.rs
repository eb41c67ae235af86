//! Display mode controller for particle dispersion layers.
//!
//! [`ParticleDispersionLayer`] turns a [`ParticleSnapshotSet`] into one of
//! three presentations on a host map:
//!
//! - [`DisplayMode::Final`]: heatmap of each particle's last known position
//! - [`DisplayMode::Exposure`]: heatmap of every particle occurrence
//! - [`DisplayMode::Keyframe`]: age-colored markers for one step
//!
//! Heatmap modes can tally points into a square grid first (see
//! [`heatbin`]) when per-point heatmaps are too dense.
//!
//! The map and the renderer are injected through the [`MapHost`] and
//! [`LayerRenderer`] traits. [`headless`] provides in-memory versions.
//!
//! # Example
//!
//! ```ignore
//! use dispersion_layer::headless::{HeadlessMap, RecordingRenderer};
//! use dispersion_layer::{DisplayMode, LayerOptions, ParticleDispersionLayer};
//!
//! let mut layer = ParticleDispersionLayer::new(LayerOptions::with_data(data), RecordingRenderer::new());
//! layer.activate(HeadlessMap::new())?;
//! layer.set_display_mode(DisplayMode::Final)?;
//! ```
//!
//! [`ParticleSnapshotSet`]: particle_data::ParticleSnapshotSet

pub mod error;
pub mod headless;
pub mod host;
pub mod layer;
pub mod mode;
pub mod options;

pub use error::{LayerError, Result};
pub use host::{CircleMarker, LayerId, LayerRenderer, MapHost, MARKER_FILL_OPACITY, MARKER_RADIUS};
pub use layer::{LayerState, ParticleDispersionLayer, PANE_NAME};
pub use mode::DisplayMode;
pub use options::{
    DataFormatUpdate, HeatBinUpdate, HeatOptions, HeatOptionsUpdate, LayerOptions,
    LayerOptionsUpdate, Merge, DEFAULT_AGE_COLORS,
};
