//! Projection of a single step to colored markers.

use dispersion_common::{Color, ColorScale, LatLng};
use particle_data::{DataFormat, ParticleRecord, ParticleSnapshotSet};
use serde::Serialize;
use tracing::{debug, warn};

use crate::{AggregationError, Result};

/// A particle at one step, colored by age.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyframeRecord {
    pub position: LatLng,
    pub age: f64,
    pub color: Color,
    pub particle: ParticleRecord,
}

/// All particles of one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyframe {
    pub index: usize,
    pub key: String,
    pub records: Vec<KeyframeRecord>,
}

/// Extract the step at positional `index` (key order, not time order) and
/// color each particle by its age.
pub fn keyframe(
    data: &ParticleSnapshotSet,
    format: &DataFormat,
    index: usize,
    scale: &ColorScale,
) -> Result<Keyframe> {
    let (key, particles) = data
        .frame(index)
        .ok_or(AggregationError::FrameOutOfRange {
            index,
            frame_count: data.step_count(),
        })?;

    let mut skipped = 0usize;
    let records: Vec<KeyframeRecord> = particles
        .iter()
        .filter_map(|particle| {
            let record = particle.position(format).zip(particle.age(format)).map(
                |(position, age)| KeyframeRecord {
                    position,
                    age,
                    color: scale.color_at(age),
                    particle: particle.clone(),
                },
            );
            if record.is_none() {
                skipped += 1;
            }
            record
        })
        .collect();

    if skipped > 0 {
        warn!(skipped, key, "Skipped particle records missing position or age");
    }
    debug!(index, key, particles = records.len(), "Extracted keyframe");

    Ok(Keyframe {
        index,
        key: key.to_string(),
        records,
    })
}
