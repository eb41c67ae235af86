//! Individual particle records.

use std::hash::{Hash, Hasher};

use dispersion_common::LatLng;
use serde::{Deserialize, Serialize};

use crate::DataFormat;

/// One particle observation: a positional tuple of numeric fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticleRecord(pub Vec<f64>);

impl ParticleRecord {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn field(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    pub fn id(&self, format: &DataFormat) -> Option<ParticleId> {
        self.field(format.id_index).map(ParticleId)
    }

    pub fn lat(&self, format: &DataFormat) -> Option<f64> {
        self.field(format.lat_index)
    }

    pub fn lng(&self, format: &DataFormat) -> Option<f64> {
        self.field(format.lon_index)
    }

    pub fn depth(&self, format: &DataFormat) -> Option<f64> {
        self.field(format.depth_index)
    }

    pub fn age(&self, format: &DataFormat) -> Option<f64> {
        self.field(format.age_index)
    }

    pub fn position(&self, format: &DataFormat) -> Option<LatLng> {
        Some(LatLng::new(self.lat(format)?, self.lng(format)?))
    }
}

impl From<Vec<f64>> for ParticleRecord {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

/// Stable particle identity across time steps.
///
/// Ids are numeric fields of the record, so equality and hashing use the
/// float bit pattern with `-0.0` folded into `0.0`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticleId(pub f64);

impl ParticleId {
    fn key(&self) -> u64 {
        if self.0 == 0.0 {
            0.0f64.to_bits()
        } else {
            self.0.to_bits()
        }
    }
}

impl PartialEq for ParticleId {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ParticleId {}

impl Hash for ParticleId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl std::fmt::Display for ParticleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_signed_zero_ids_are_equal() {
        let mut ids = HashSet::new();
        ids.insert(ParticleId(0.0));
        assert!(ids.contains(&ParticleId(-0.0)));
        assert_ne!(ParticleId(1.0), ParticleId(1.5));
    }

    #[test]
    fn test_short_record_has_no_position() {
        let fmt = DataFormat::default();
        let rec = ParticleRecord::new(vec![7.0, 144.9]);
        assert_eq!(rec.id(&fmt), Some(ParticleId(7.0)));
        assert_eq!(rec.position(&fmt), None);
        assert_eq!(rec.age(&fmt), None);
    }
}
