//! Spherical-earth distance helpers.

use dispersion_common::LatLng;

/// Mean earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Kilometres per degree of latitude (and of longitude at the equator).
pub fn km_per_degree() -> f64 {
    EARTH_RADIUS_KM * std::f64::consts::PI / 180.0
}

/// Great-circle distance between two points in kilometres.
///
/// Uses the haversine formula.
pub fn haversine_km(a: LatLng, b: LatLng) -> f64 {
    let lat1_rad = a.lat.to_radians();
    let lat2_rad = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lon = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}

/// Degrees of latitude spanning `km` along a meridian.
pub fn km_to_lat_degrees(km: f64) -> f64 {
    km / km_per_degree()
}

/// Degrees of longitude whose haversine distance at latitude `lat` equals
/// `km`.
///
/// This inverts [`haversine_km`] between two points sharing a latitude.
/// Distances that cannot be reached along the parallel saturate at 180°.
pub fn km_to_lng_degrees(lat: f64, km: f64) -> f64 {
    let cos_lat = lat.to_radians().cos();
    if cos_lat <= f64::EPSILON {
        return 180.0;
    }
    let ratio = ((km / (2.0 * EARTH_RADIUS_KM)).sin() / cos_lat).clamp(-1.0, 1.0);
    (2.0 * ratio.asin()).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_same_point() {
        let p = LatLng::new(35.2, -97.5);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn test_haversine_london_paris() {
        let london = LatLng::new(51.5074, -0.1278);
        let paris = LatLng::new(48.8566, 2.3522);
        let d = haversine_km(london, paris);
        assert!((d - 343.5).abs() < 2.0, "got {d}");
    }

    #[test]
    fn test_one_degree_latitude() {
        let d = haversine_km(LatLng::new(0.0, 0.0), LatLng::new(1.0, 0.0));
        assert!((d - km_per_degree()).abs() < 1e-9);
        assert!((km_to_lat_degrees(d) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_lng_degrees_inverts_haversine() {
        for lat in [-60.0, -38.0, 0.0, 45.0, 70.0] {
            let dlng = km_to_lng_degrees(lat, 3.7);
            let d = haversine_km(LatLng::new(lat, 10.0), LatLng::new(lat, 10.0 - dlng));
            assert!((d - 3.7).abs() < 1e-9, "lat {lat}: {d}");
        }
    }
}
