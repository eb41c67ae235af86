//! Collaborators supplied by the embedding map application.
//!
//! The layer never draws anything itself. It asks a [`MapHost`] for panes,
//! longitude wrapping and layer attachment, and asks a [`LayerRenderer`] to
//! build and feed heatmap or marker layers. Both are injected, so the layer
//! runs the same against a real map or a headless stand-in.

use std::fmt;

use aggregation::HeatmapPayload;
use dispersion_common::{Color, LatLng};
use particle_data::ParticleRecord;
use serde::Serialize;

use crate::HeatOptions;

/// Marker radius in pixels.
pub const MARKER_RADIUS: f64 = 8.0;

pub const MARKER_FILL_OPACITY: f64 = 0.3;

/// Identifies one rendered layer across the map and the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LayerId(pub u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer-{}", self.0)
    }
}

/// The host map.
pub trait MapHost {
    /// Create a named pane for the layer's drawing surface.
    fn create_pane(&mut self, name: &str);

    fn remove_pane(&mut self, name: &str);

    /// Normalize a position into the map's longitude range.
    fn wrap_lat_lng(&self, position: LatLng) -> LatLng {
        position.wrapped()
    }

    /// Show a rendered layer.
    fn add_layer(&mut self, id: LayerId);

    /// Hide a rendered layer. Unknown ids are ignored.
    fn remove_layer(&mut self, id: LayerId);
}

/// The host heatmap and vector renderer.
pub trait LayerRenderer {
    fn create_heat_layer(&mut self, id: LayerId, pane: &str, options: &HeatOptions);

    /// Replace the data of a heat layer without rebuilding it.
    fn set_heat_data(&mut self, id: LayerId, payload: &HeatmapPayload);

    /// Outline the binning grid of a heat layer. Hosts without debug overlays
    /// can ignore this.
    fn set_grid_outlines(&mut self, id: LayerId, outlines: &[Vec<LatLng>]) {
        let _ = (id, outlines);
    }

    fn create_marker_layer(&mut self, id: LayerId, pane: &str);

    /// Replace every marker of a marker layer.
    fn set_markers(&mut self, id: LayerId, markers: &[CircleMarker]);

    /// Release a layer. Unknown ids are ignored.
    fn destroy_layer(&mut self, id: LayerId);
}

/// A filled circle for one particle in a keyframe.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleMarker {
    pub position: LatLng,
    pub radius: f64,
    pub fill_color: Color,
    pub fill_opacity: f64,
    pub stroke: bool,
    /// The raw record the marker was built from.
    pub particle: ParticleRecord,
}

impl CircleMarker {
    pub fn for_particle(position: LatLng, fill_color: Color, particle: ParticleRecord) -> Self {
        Self {
            position,
            radius: MARKER_RADIUS,
            fill_color,
            fill_opacity: MARKER_FILL_OPACITY,
            stroke: false,
            particle,
        }
    }
}
