//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

use crate::LatLng;

/// A geographic bounding box in degrees.
///
/// `x` is longitude and `y` is latitude, so `min_x` is the west edge and
/// `min_y` the south edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Smallest box containing every finite point, or `None` if there are none.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LatLng>,
    {
        let mut bbox: Option<BoundingBox> = None;
        for p in points.into_iter().filter(LatLng::is_finite) {
            match bbox.as_mut() {
                Some(b) => b.extend(p),
                None => bbox = Some(BoundingBox::new(p.lng, p.lat, p.lng, p.lat)),
            }
        }
        bbox
    }

    /// Grow the box to include `p`.
    pub fn extend(&mut self, p: LatLng) {
        self.min_x = self.min_x.min(p.lng);
        self.max_x = self.max_x.max(p.lng);
        self.min_y = self.min_y.min(p.lat);
        self.max_y = self.max_y.max(p.lat);
    }

    pub fn west(&self) -> f64 {
        self.min_x
    }

    pub fn east(&self) -> f64 {
        self.max_x
    }

    pub fn south(&self) -> f64 {
        self.min_y
    }

    pub fn north(&self) -> f64 {
        self.max_y
    }

    pub fn south_west(&self) -> LatLng {
        LatLng::new(self.min_y, self.min_x)
    }

    pub fn north_west(&self) -> LatLng {
        LatLng::new(self.max_y, self.min_x)
    }

    /// Check if a point is contained within this bbox (edges inclusive).
    pub fn contains(&self, p: LatLng) -> bool {
        p.lng >= self.min_x && p.lng <= self.max_x && p.lat >= self.min_y && p.lat <= self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_skips_non_finite() {
        let bbox = BoundingBox::from_points([
            LatLng::new(10.0, 20.0),
            LatLng::new(f64::NAN, 0.0),
            LatLng::new(12.0, 18.0),
        ])
        .unwrap();
        assert_eq!(bbox, BoundingBox::new(18.0, 10.0, 20.0, 12.0));
    }

    #[test]
    fn test_from_points_empty() {
        assert!(BoundingBox::from_points(Vec::new()).is_none());
    }
}
