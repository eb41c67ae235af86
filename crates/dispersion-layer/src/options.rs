//! Layer options and partial updates.
//!
//! [`LayerOptions`] is the full configuration of a layer. Callers change it
//! with a [`LayerOptionsUpdate`], where every field is optional. Applying an
//! update is a recursive merge: nested groups merge field by field, lists
//! replace, and the dataset is always swapped as a whole.

use std::sync::Arc;

use dispersion_common::Color;
use heatbin::HeatBinConfig;
use particle_data::{DataFormat, ParticleSnapshotSet};
use serde::{Deserialize, Serialize};

use crate::DisplayMode;

/// Colour stops used when no age colour scale is configured.
pub const DEFAULT_AGE_COLORS: [&str; 3] = ["green", "yellow", "red"];

/// Complete layer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerOptions {
    /// The dataset. Shared, never copied or merged.
    #[serde(skip)]
    pub data: Option<Arc<ParticleSnapshotSet>>,

    #[serde(default)]
    pub data_format: DataFormat,

    #[serde(default)]
    pub display_mode: Option<DisplayMode>,

    /// Keyframe shown when KEYFRAME mode is entered. Updating it through
    /// `set_options` moves the displayed keyframe too.
    #[serde(default)]
    pub start_frame_index: usize,

    /// Age colour stops; `None` selects [`DEFAULT_AGE_COLORS`].
    #[serde(default)]
    pub age_color_scale: Option<Vec<Color>>,

    /// Age domain `[lo, hi]`; `None` derives `[0, stepCount]`.
    #[serde(default)]
    pub age_domain: Option<(f64, f64)>,

    #[serde(default)]
    pub heat_options: HeatOptions,

    #[serde(default = "default_intensity")]
    pub exposure_intensity: f64,

    #[serde(default = "default_intensity")]
    pub final_intensity: f64,
}

fn default_intensity() -> f64 {
    1.0
}

impl Default for LayerOptions {
    fn default() -> Self {
        Self {
            data: None,
            data_format: DataFormat::default(),
            display_mode: None,
            start_frame_index: 0,
            age_color_scale: None,
            age_domain: None,
            heat_options: HeatOptions::default(),
            exposure_intensity: default_intensity(),
            final_intensity: default_intensity(),
        }
    }
}

/// Options handed to the heatmap renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatOptions {
    #[serde(default = "default_blur")]
    pub blur: f64,

    /// Radius in pixels, or in map units when `scale_radius` is set.
    #[serde(default = "default_radius")]
    pub radius: f64,

    #[serde(default = "default_radius_meters")]
    pub radius_meters: f64,

    #[serde(default)]
    pub fixed_radius: bool,

    #[serde(default = "default_max_opacity")]
    pub max_opacity: f64,

    /// Scale the radius with map zoom.
    #[serde(default)]
    pub scale_radius: bool,

    /// Colorize against the extrema inside the viewport instead of the
    /// whole payload.
    #[serde(default)]
    pub use_local_extrema: bool,

    #[serde(default = "default_lat_field")]
    pub lat_field: String,

    #[serde(default = "default_lng_field")]
    pub lng_field: String,

    #[serde(default = "default_value_field")]
    pub value_field: String,

    /// `max` of unbinned payloads.
    #[serde(default = "default_max_value")]
    pub max_value: f64,

    #[serde(default)]
    pub heat_bin: HeatBinConfig,
}

fn default_blur() -> f64 {
    1.0
}

fn default_radius() -> f64 {
    20.0
}

fn default_radius_meters() -> f64 {
    1000.0
}

fn default_max_opacity() -> f64 {
    0.8
}

fn default_lat_field() -> String {
    "lat".to_string()
}

fn default_lng_field() -> String {
    "lng".to_string()
}

fn default_value_field() -> String {
    "value".to_string()
}

fn default_max_value() -> f64 {
    10.0
}

impl Default for HeatOptions {
    fn default() -> Self {
        Self {
            blur: default_blur(),
            radius: default_radius(),
            radius_meters: default_radius_meters(),
            fixed_radius: false,
            max_opacity: default_max_opacity(),
            scale_radius: false,
            use_local_extrema: false,
            lat_field: default_lat_field(),
            lng_field: default_lng_field(),
            value_field: default_value_field(),
            max_value: default_max_value(),
            heat_bin: HeatBinConfig::default(),
        }
    }
}

// ============================================================================
// Partial updates
// ============================================================================

/// A partial [`LayerOptions`]. Absent fields leave the current value alone.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayerOptionsUpdate {
    #[serde(skip)]
    pub data: Option<Arc<ParticleSnapshotSet>>,
    pub data_format: Option<DataFormatUpdate>,
    pub display_mode: Option<DisplayMode>,
    pub start_frame_index: Option<usize>,
    pub age_color_scale: Option<Vec<Color>>,
    pub age_domain: Option<(f64, f64)>,
    pub heat_options: Option<HeatOptionsUpdate>,
    pub exposure_intensity: Option<f64>,
    pub final_intensity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataFormatUpdate {
    pub id_index: Option<usize>,
    #[serde(alias = "longitudeIndex")]
    pub lon_index: Option<usize>,
    #[serde(alias = "latitudeIndex")]
    pub lat_index: Option<usize>,
    pub depth_index: Option<usize>,
    pub age_index: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeatOptionsUpdate {
    pub blur: Option<f64>,
    pub radius: Option<f64>,
    pub radius_meters: Option<f64>,
    pub fixed_radius: Option<bool>,
    pub max_opacity: Option<f64>,
    pub scale_radius: Option<bool>,
    pub use_local_extrema: Option<bool>,
    pub lat_field: Option<String>,
    pub lng_field: Option<String>,
    pub value_field: Option<String>,
    pub max_value: Option<f64>,
    pub heat_bin: Option<HeatBinUpdate>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeatBinUpdate {
    pub enabled: Option<bool>,
    pub cell_size_km: Option<f64>,
    pub max_factor: Option<f64>,
    pub show_bin_grid: Option<bool>,
    pub max_cells: Option<usize>,
}

/// Apply a partial update in place.
pub trait Merge<U> {
    fn merge(&mut self, update: U);
}

fn set<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

impl Merge<LayerOptionsUpdate> for LayerOptions {
    fn merge(&mut self, update: LayerOptionsUpdate) {
        // Swapped, not merged.
        if update.data.is_some() {
            self.data = update.data;
        }
        if let Some(format) = update.data_format {
            self.data_format.merge(format);
        }
        if update.display_mode.is_some() {
            self.display_mode = update.display_mode;
        }
        set(&mut self.start_frame_index, update.start_frame_index);
        if update.age_color_scale.is_some() {
            self.age_color_scale = update.age_color_scale;
        }
        if update.age_domain.is_some() {
            self.age_domain = update.age_domain;
        }
        if let Some(heat) = update.heat_options {
            self.heat_options.merge(heat);
        }
        set(&mut self.exposure_intensity, update.exposure_intensity);
        set(&mut self.final_intensity, update.final_intensity);
    }
}

impl Merge<DataFormatUpdate> for DataFormat {
    fn merge(&mut self, update: DataFormatUpdate) {
        set(&mut self.id_index, update.id_index);
        set(&mut self.lon_index, update.lon_index);
        set(&mut self.lat_index, update.lat_index);
        set(&mut self.depth_index, update.depth_index);
        set(&mut self.age_index, update.age_index);
    }
}

impl Merge<HeatOptionsUpdate> for HeatOptions {
    fn merge(&mut self, update: HeatOptionsUpdate) {
        set(&mut self.blur, update.blur);
        set(&mut self.radius, update.radius);
        set(&mut self.radius_meters, update.radius_meters);
        set(&mut self.fixed_radius, update.fixed_radius);
        set(&mut self.max_opacity, update.max_opacity);
        set(&mut self.scale_radius, update.scale_radius);
        set(&mut self.use_local_extrema, update.use_local_extrema);
        set(&mut self.lat_field, update.lat_field);
        set(&mut self.lng_field, update.lng_field);
        set(&mut self.value_field, update.value_field);
        set(&mut self.max_value, update.max_value);
        if let Some(bin) = update.heat_bin {
            self.heat_bin.merge(bin);
        }
    }
}

impl Merge<HeatBinUpdate> for HeatBinConfig {
    fn merge(&mut self, update: HeatBinUpdate) {
        set(&mut self.enabled, update.enabled);
        set(&mut self.cell_size_km, update.cell_size_km);
        set(&mut self.max_factor, update.max_factor);
        set(&mut self.show_bin_grid, update.show_bin_grid);
        set(&mut self.max_cells, update.max_cells);
    }
}

impl LayerOptions {
    /// Options with the given dataset and defaults elsewhere.
    pub fn with_data(data: impl Into<Arc<ParticleSnapshotSet>>) -> Self {
        Self {
            data: Some(data.into()),
            ..Self::default()
        }
    }

    /// Configured age colour stops, or the defaults.
    pub fn age_colors(&self) -> Vec<Color> {
        match &self.age_color_scale {
            Some(stops) => stops.clone(),
            None => DEFAULT_AGE_COLORS
                .iter()
                .filter_map(|name| name.parse().ok())
                .collect(),
        }
    }
}
