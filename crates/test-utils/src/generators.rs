//! Synthetic particle data generators.
//!
//! Deterministic generators produce predictable, verifiable layouts; the
//! random ones take an explicit seed so failures are reproducible.

use dispersion_common::{BoundingBox, LatLng};
use particle_data::{ParticleRecord, ParticleSnapshotSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::fixtures::particle;

/// Hourly step key for step `i`, starting 2020-01-01T00:00:00Z.
pub fn hourly_key(i: usize) -> String {
    format!("2020-01-{:02}T{:02}:00:00Z", 1 + i / 24, i % 24)
}

/// A plume of `particles` released at `origin`, drifting east by
/// `drift_deg` per step and fanning out north/south by particle index.
///
/// Particle `n` is released at step `n % steps` so later steps contain
/// more particles, like a continuous release.
pub fn drifting_plume(
    particles: usize,
    steps: usize,
    origin: LatLng,
    drift_deg: f64,
) -> ParticleSnapshotSet {
    let mut set = ParticleSnapshotSet::new();
    for step in 0..steps {
        let records: Vec<ParticleRecord> = (0..particles)
            .filter(|n| n % steps.max(1) <= step)
            .map(|n| {
                let released = n % steps.max(1);
                let age = (step - released) as f64;
                let spread = (n as f64 - particles as f64 / 2.0) * drift_deg * 0.1;
                particle(
                    n as f64,
                    origin.lat + spread * age / steps.max(1) as f64,
                    origin.lng + drift_deg * age,
                    age,
                )
            })
            .collect();
        set.insert(hourly_key(step), records);
    }
    set
}

/// `count` uniformly random points inside `bbox`.
pub fn random_cloud(seed: u64, count: usize, bbox: &BoundingBox) -> Vec<LatLng> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            LatLng::new(
                rng.gen_range(bbox.min_y..=bbox.max_y),
                rng.gen_range(bbox.min_x..=bbox.max_x),
            )
        })
        .collect()
}

/// A random dataset where each of `particles` ids is present in a step
/// with probability `presence`, at a random position inside `bbox`.
///
/// Step keys are hourly and inserted in a shuffled order, so positional
/// and temporal order differ.
pub fn random_dataset(
    seed: u64,
    steps: usize,
    particles: usize,
    presence: f64,
    bbox: &BoundingBox,
) -> ParticleSnapshotSet {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut order: Vec<usize> = (0..steps).collect();
    for i in (1..order.len()).rev() {
        let j = rng.gen_range(0..=i);
        order.swap(i, j);
    }

    let mut set = ParticleSnapshotSet::new();
    for step in order {
        let mut records = Vec::new();
        for id in 0..particles {
            if !rng.gen_bool(presence) {
                continue;
            }
            let lat = rng.gen_range(bbox.min_y..=bbox.max_y);
            let lng = rng.gen_range(bbox.min_x..=bbox.max_x);
            records.push(particle(id as f64, lat, lng, step as f64));
        }
        set.insert(hourly_key(step), records);
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hourly_key_rolls_over_days() {
        assert_eq!(hourly_key(0), "2020-01-01T00:00:00Z");
        assert_eq!(hourly_key(25), "2020-01-02T01:00:00Z");
    }

    #[test]
    fn test_drifting_plume_grows() {
        let set = drifting_plume(10, 5, LatLng::new(-38.0, 144.8), 0.01);
        assert_eq!(set.step_count(), 5);
        let first = set.frame(0).unwrap().1.len();
        let last = set.frame(4).unwrap().1.len();
        assert!(last > first);
        assert_eq!(last, 10);
    }

    #[test]
    fn test_random_cloud_inside_bbox() {
        let bbox = BoundingBox::new(144.6, -38.3, 145.1, -37.8);
        let cloud = random_cloud(7, 500, &bbox);
        assert_eq!(cloud.len(), 500);
        assert!(cloud.iter().all(|p| bbox.contains(*p)));
        assert_eq!(cloud, random_cloud(7, 500, &bbox));
    }

    #[test]
    fn test_random_dataset_is_reproducible() {
        let bbox = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let a = random_dataset(3, 6, 20, 0.5, &bbox);
        let b = random_dataset(3, 6, 20, 0.5, &bbox);
        assert_eq!(a, b);
        assert_eq!(a.step_count(), 6);
    }
}
