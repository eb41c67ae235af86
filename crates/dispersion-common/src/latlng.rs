//! Geographic coordinate pair.

use serde::{Deserialize, Serialize};

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Normalize longitude into `[-180, 180)`, leaving latitude untouched.
    ///
    /// Values already inside the range are returned unchanged, so `180.0`
    /// stays `180.0` the way web map hosts treat the antimeridian.
    pub fn wrapped(&self) -> LatLng {
        if (-180.0..=180.0).contains(&self.lng) || !self.lng.is_finite() {
            return *self;
        }
        let lng = (self.lng + 180.0).rem_euclid(360.0) - 180.0;
        LatLng { lat: self.lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl From<(f64, f64)> for LatLng {
    /// `(lat, lng)` tuple.
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_inside_range_is_identity() {
        let p = LatLng::new(10.0, 179.5);
        assert_eq!(p.wrapped(), p);
        assert_eq!(LatLng::new(0.0, 180.0).wrapped().lng, 180.0);
    }

    #[test]
    fn test_wrap_east_overflow() {
        let p = LatLng::new(-5.0, 190.0).wrapped();
        assert!((p.lng - (-170.0)).abs() < 1e-9);
        assert_eq!(p.lat, -5.0);
    }

    #[test]
    fn test_wrap_west_overflow() {
        let p = LatLng::new(0.0, -540.0).wrapped();
        assert!((p.lng - (-180.0)).abs() < 1e-9);
    }
}
