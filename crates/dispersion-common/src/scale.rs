//! Continuous color scales over a numeric domain.

use crate::Color;

/// Maps a numeric value to a color by linear interpolation across evenly
/// spaced stops.
///
/// Values outside the domain clamp to the nearest end. A degenerate domain
/// (`lo == hi`) yields the first stop for every input.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    stops: Vec<Color>,
    domain: (f64, f64),
}

impl ColorScale {
    /// Build a scale from at least two stops over `[lo, hi]`.
    pub fn new(stops: Vec<Color>, domain: (f64, f64)) -> Result<Self, ColorScaleError> {
        if stops.len() < 2 {
            return Err(ColorScaleError::TooFewStops(stops.len()));
        }

        let (lo, hi) = domain;
        if !lo.is_finite() || !hi.is_finite() {
            return Err(ColorScaleError::NonFiniteDomain { lo, hi });
        }
        if lo > hi {
            return Err(ColorScaleError::InvertedDomain { lo, hi });
        }

        Ok(Self { stops, domain })
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn stops(&self) -> &[Color] {
        &self.stops
    }

    /// Position of `value` within the domain, in `[0, 1]`.
    fn normalize(&self, value: f64) -> f64 {
        let (lo, hi) = self.domain;
        if hi == lo || value.is_nan() {
            return 0.0;
        }
        ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
    }

    /// Color for `value`.
    pub fn color_at(&self, value: f64) -> Color {
        let t = self.normalize(value);
        let segments = (self.stops.len() - 1) as f64;
        let scaled = t * segments;

        let i = (scaled.floor() as usize).min(self.stops.len() - 2);
        let local_t = scaled - i as f64;

        self.stops[i].lerp(&self.stops[i + 1], local_t)
    }
}

/// Color scale construction errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorScaleError {
    #[error("Color scale needs at least 2 stops, got {0}")]
    TooFewStops(usize),

    #[error("Color scale domain [{lo}, {hi}] is not finite")]
    NonFiniteDomain { lo: f64, hi: f64 },

    #[error("Color scale domain [{lo}, {hi}] has lo > hi")]
    InvertedDomain { lo: f64, hi: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn traffic_light(domain: (f64, f64)) -> ColorScale {
        let stops = ["green", "yellow", "red"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        ColorScale::new(stops, domain).unwrap()
    }

    #[test]
    fn test_endpoints_and_middle_stop() {
        let scale = traffic_light((0.0, 10.0));
        assert_eq!(scale.color_at(0.0), Color::rgb(0, 128, 0));
        assert_eq!(scale.color_at(5.0), Color::rgb(255, 255, 0));
        assert_eq!(scale.color_at(10.0), Color::rgb(255, 0, 0));
    }

    #[test]
    fn test_interpolates_between_stops() {
        let scale = traffic_light((0.0, 4.0));
        // Halfway between yellow and red
        assert_eq!(scale.color_at(3.0), Color::rgb(255, 128, 0));
    }

    #[test]
    fn test_out_of_domain_clamps() {
        let scale = traffic_light((2.0, 8.0));
        assert_eq!(scale.color_at(-100.0), scale.color_at(2.0));
        assert_eq!(scale.color_at(1e9), scale.color_at(8.0));
    }

    #[test]
    fn test_nan_maps_to_low_end() {
        let scale = traffic_light((2.0, 8.0));
        assert_eq!(scale.color_at(f64::NAN), scale.color_at(2.0));
    }

    #[test]
    fn test_degenerate_domain_returns_first_stop() {
        let scale = traffic_light((3.0, 3.0));
        assert_eq!(scale.color_at(3.0), Color::rgb(0, 128, 0));
        assert_eq!(scale.color_at(100.0), Color::rgb(0, 128, 0));
    }

    #[test]
    fn test_rejects_bad_construction() {
        assert_eq!(
            ColorScale::new(vec![Color::rgb(0, 0, 0)], (0.0, 1.0)),
            Err(ColorScaleError::TooFewStops(1))
        );
        assert!(matches!(
            ColorScale::new(vec![Color::rgb(0, 0, 0); 2], (1.0, 0.0)),
            Err(ColorScaleError::InvertedDomain { .. })
        ));
        assert!(matches!(
            ColorScale::new(vec![Color::rgb(0, 0, 0); 2], (0.0, f64::INFINITY)),
            Err(ColorScaleError::NonFiniteDomain { .. })
        ));
    }
}
