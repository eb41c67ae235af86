//! Common test fixtures for particle-dispersion tests.
//!
//! Records use the default `[id, lon, lat, depth, age]` layout unless a
//! fixture says otherwise.

use particle_data::{DataFormat, ParticleRecord, ParticleSnapshotSet};

/// Builds a record in the default layout.
pub fn particle(id: f64, lat: f64, lng: f64, age: f64) -> ParticleRecord {
    ParticleRecord::new(vec![id, lng, lat, 0.0, age])
}

/// Three hourly steps: particle 1 at (10, 20) then (11, 21), particle 2
/// only in the last step at (15, 25).
///
/// Final positions are `{1: (11, 21), 2: (15, 25)}`.
pub fn three_step_example() -> ParticleSnapshotSet {
    let mut set = ParticleSnapshotSet::new();
    set.insert("2020-01-01T00:00:00Z", vec![particle(1.0, 10.0, 20.0, 0.0)]);
    set.insert("2020-01-01T01:00:00Z", vec![particle(1.0, 11.0, 21.0, 1.0)]);
    set.insert("2020-01-01T02:00:00Z", vec![particle(2.0, 15.0, 25.0, 0.0)]);
    set
}

/// Same content as [`three_step_example`] with keys inserted out of
/// temporal order.
pub fn shuffled_three_step_example() -> ParticleSnapshotSet {
    let mut set = ParticleSnapshotSet::new();
    set.insert("2020-01-01T02:00:00Z", vec![particle(2.0, 15.0, 25.0, 0.0)]);
    set.insert("2020-01-01T00:00:00Z", vec![particle(1.0, 10.0, 20.0, 0.0)]);
    set.insert("2020-01-01T01:00:00Z", vec![particle(1.0, 11.0, 21.0, 1.0)]);
    set
}

/// Layout used by older model exports: `[lon, lat, depth, age, id]`.
pub fn lon_first_format() -> DataFormat {
    DataFormat {
        id_index: 4,
        lon_index: 0,
        lat_index: 1,
        depth_index: 2,
        age_index: 3,
    }
}

/// Common bounding box definitions for testing, as
/// `(west, south, east, north)`.
pub mod bbox {
    /// Port Phillip Bay, roughly 50km across.
    pub const PORT_PHILLIP: (f64, f64, f64, f64) = (144.6, -38.3, 145.1, -37.8);

    /// Equatorial box about 1km on each side.
    pub const EQUATOR_1KM: (f64, f64, f64, f64) = (0.0, 0.0, 0.008993, 0.008993);

    /// Single point (degenerate bbox)
    pub const POINT: (f64, f64, f64, f64) = (0.0, 0.0, 0.0, 0.0);
}
