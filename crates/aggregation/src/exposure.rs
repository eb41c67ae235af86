//! Cumulative presence of particles across every step.

use particle_data::{DataFormat, ParticleSnapshotSet};
use tracing::{debug, warn};

use crate::HeatPoint;

/// One point per particle occurrence, weighted by `intensity`.
///
/// Occurrences are not deduplicated: a particle present in N steps
/// contributes N points, so density reflects dwell time.
pub fn exposure(data: &ParticleSnapshotSet, format: &DataFormat, intensity: f64) -> Vec<HeatPoint> {
    let mut points = Vec::with_capacity(data.total_occurrences());
    let mut skipped = 0usize;

    for particle in data.flatten_unordered() {
        match particle.position(format) {
            Some(position) => points.push(HeatPoint::at(position, intensity)),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!(skipped, "Skipped particle records missing a position");
    }
    debug!(points = points.len(), steps = data.step_count(), "Computed exposure");

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use particle_data::ParticleRecord;

    #[test]
    fn test_repeated_particle_counts_every_step() {
        let mut set = ParticleSnapshotSet::new();
        let p = ParticleRecord::new(vec![1.0, 20.0, 10.0, 0.0, 0.0]);
        set.insert("a", vec![p.clone()]);
        set.insert("b", vec![p.clone()]);
        set.insert("c", vec![p]);

        let points = exposure(&set, &DataFormat::default(), 0.5);
        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|pt| *pt == HeatPoint::new(10.0, 20.0, 0.5)));
    }
}
