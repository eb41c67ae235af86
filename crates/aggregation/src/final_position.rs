//! Last known position of every particle.

use std::collections::HashSet;

use dispersion_common::LatLng;
use particle_data::{DataFormat, ParticleId, ParticleSnapshotSet};
use tracing::{debug, warn};

use crate::HeatPoint;

/// One point per distinct particle id, at the particle's temporally latest
/// snapshot, weighted by `intensity`.
///
/// Steps are walked newest first. Within a step the first record carrying
/// an id wins. The walk stops as soon as every id has been placed. Output
/// order is discovery order.
pub fn final_positions(
    data: &ParticleSnapshotSet,
    format: &DataFormat,
    intensity: f64,
) -> Vec<HeatPoint> {
    let mut remaining: HashSet<ParticleId> =
        data.unique_particle_ids(format).into_iter().collect();
    let mut points = Vec::with_capacity(remaining.len());
    let mut skipped = 0usize;
    let mut steps_walked = 0usize;

    for (_, particles) in data.ordered_steps().into_iter().rev() {
        if remaining.is_empty() {
            break;
        }
        steps_walked += 1;

        for particle in particles {
            let (Some(id), Some(position)) = (particle.id(format), particle.position(format)) else {
                skipped += 1;
                continue;
            };
            if remaining.remove(&id) {
                points.push(HeatPoint::at(position, intensity));
            }
        }
    }

    if skipped > 0 {
        warn!(skipped, "Skipped particle records missing id or position");
    }
    if !remaining.is_empty() {
        // Only ids whose every occurrence lacked a position end up here.
        debug!(unplaced = remaining.len(), "Particles without a usable position");
    }
    debug!(
        particles = points.len(),
        steps_walked,
        steps = data.step_count(),
        "Computed final positions"
    );

    points
}

/// Final position of one particle, if it appears anywhere in the dataset.
pub fn final_position_of(
    data: &ParticleSnapshotSet,
    format: &DataFormat,
    id: ParticleId,
) -> Option<LatLng> {
    data.ordered_steps()
        .into_iter()
        .rev()
        .flat_map(|(_, particles)| particles.iter())
        .find(|p| p.id(format) == Some(id) && p.position(format).is_some())
        .and_then(|p| p.position(format))
}
