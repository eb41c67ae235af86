//! In-memory host implementations.
//!
//! [`HeadlessMap`] and [`RecordingRenderer`] keep everything they are asked
//! to do, which makes them usable both for driving a layer without a real
//! map and for asserting on what a layer did.

use std::collections::BTreeMap;

use aggregation::HeatmapPayload;
use dispersion_common::LatLng;
use serde::Serialize;

use crate::{CircleMarker, HeatOptions, LayerId, LayerRenderer, MapHost};

/// Something that happened to a [`HeadlessMap`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "target", rename_all = "snake_case")]
pub enum MapEvent {
    PaneCreated(String),
    PaneRemoved(String),
    LayerAdded(LayerId),
    LayerRemoved(LayerId),
}

/// A map with no viewport.
#[derive(Debug, Clone, Default)]
pub struct HeadlessMap {
    panes: Vec<String>,
    layers: Vec<LayerId>,
    events: Vec<MapEvent>,
}

impl HeadlessMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panes(&self) -> &[String] {
        &self.panes
    }

    /// Layers currently shown, in the order they were added.
    pub fn layers(&self) -> &[LayerId] {
        &self.layers
    }

    pub fn events(&self) -> &[MapEvent] {
        &self.events
    }
}

impl MapHost for HeadlessMap {
    fn create_pane(&mut self, name: &str) {
        if !self.panes.iter().any(|p| p == name) {
            self.panes.push(name.to_string());
        }
        self.events.push(MapEvent::PaneCreated(name.to_string()));
    }

    fn remove_pane(&mut self, name: &str) {
        self.panes.retain(|p| p != name);
        self.events.push(MapEvent::PaneRemoved(name.to_string()));
    }

    fn add_layer(&mut self, id: LayerId) {
        if !self.layers.contains(&id) {
            self.layers.push(id);
        }
        self.events.push(MapEvent::LayerAdded(id));
    }

    fn remove_layer(&mut self, id: LayerId) {
        if let Some(pos) = self.layers.iter().position(|l| *l == id) {
            self.layers.remove(pos);
            self.events.push(MapEvent::LayerRemoved(id));
        }
    }
}

/// What a [`RecordingRenderer`] holds for one layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderedLayer {
    Heat {
        pane: String,
        options: HeatOptions,
        payload: Option<HeatmapPayload>,
        outlines: Vec<Vec<LatLng>>,
    },
    Markers {
        pane: String,
        markers: Vec<CircleMarker>,
    },
}

impl RenderedLayer {
    pub fn payload(&self) -> Option<&HeatmapPayload> {
        match self {
            Self::Heat { payload, .. } => payload.as_ref(),
            Self::Markers { .. } => None,
        }
    }

    pub fn markers(&self) -> &[CircleMarker] {
        match self {
            Self::Markers { markers, .. } => markers,
            Self::Heat { .. } => &[],
        }
    }

    pub fn outlines(&self) -> &[Vec<LatLng>] {
        match self {
            Self::Heat { outlines, .. } => outlines,
            Self::Markers { .. } => &[],
        }
    }
}

/// A renderer that stores layers instead of drawing them.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    layers: BTreeMap<LayerId, RenderedLayer>,
    created: usize,
    destroyed: usize,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layer(&self, id: LayerId) -> Option<&RenderedLayer> {
        self.layers.get(&id)
    }

    /// Live layers by id.
    pub fn layers(&self) -> &BTreeMap<LayerId, RenderedLayer> {
        &self.layers
    }

    /// The most recently created live layer.
    pub fn latest(&self) -> Option<&RenderedLayer> {
        self.layers.values().next_back()
    }

    pub fn created_count(&self) -> usize {
        self.created
    }

    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }
}

impl LayerRenderer for RecordingRenderer {
    fn create_heat_layer(&mut self, id: LayerId, pane: &str, options: &HeatOptions) {
        self.created += 1;
        self.layers.insert(
            id,
            RenderedLayer::Heat {
                pane: pane.to_string(),
                options: options.clone(),
                payload: None,
                outlines: Vec::new(),
            },
        );
    }

    fn set_heat_data(&mut self, id: LayerId, data: &HeatmapPayload) {
        if let Some(RenderedLayer::Heat { payload, .. }) = self.layers.get_mut(&id) {
            *payload = Some(data.clone());
        }
    }

    fn set_grid_outlines(&mut self, id: LayerId, rings: &[Vec<LatLng>]) {
        if let Some(RenderedLayer::Heat { outlines, .. }) = self.layers.get_mut(&id) {
            *outlines = rings.to_vec();
        }
    }

    fn create_marker_layer(&mut self, id: LayerId, pane: &str) {
        self.created += 1;
        self.layers.insert(
            id,
            RenderedLayer::Markers {
                pane: pane.to_string(),
                markers: Vec::new(),
            },
        );
    }

    fn set_markers(&mut self, id: LayerId, new_markers: &[CircleMarker]) {
        if let Some(RenderedLayer::Markers { markers, .. }) = self.layers.get_mut(&id) {
            *markers = new_markers.to_vec();
        }
    }

    fn destroy_layer(&mut self, id: LayerId) {
        if self.layers.remove(&id).is_some() {
            self.destroyed += 1;
        }
    }
}
