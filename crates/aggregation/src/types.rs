//! Output records handed to heatmap renderers.

use dispersion_common::LatLng;
use serde::{Deserialize, Serialize};

/// A weighted heatmap sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatPoint {
    pub lat: f64,
    pub lng: f64,
    pub value: f64,
}

impl HeatPoint {
    pub fn new(lat: f64, lng: f64, value: f64) -> Self {
        Self { lat, lng, value }
    }

    pub fn at(position: LatLng, value: f64) -> Self {
        Self::new(position.lat, position.lng, value)
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

/// The `{min, max, data}` document heatmap renderers consume.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HeatmapPayload {
    pub min: f64,
    pub max: f64,
    pub data: Vec<HeatPoint>,
}

impl HeatmapPayload {
    pub fn new(min: f64, max: f64, data: Vec<HeatPoint>) -> Self {
        Self { min, max, data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sum of every point's value.
    pub fn total_value(&self) -> f64 {
        self.data.iter().map(|p| p.value).sum()
    }
}
