//! The time-indexed snapshot collection.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use dispersion_common::{parse_step_key, BoundingBox, DispersionResult, LatLng};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{DataFormat, ParticleId, ParticleRecord};

/// Particle snapshots keyed by time-step.
///
/// Keys keep their insertion (or document) order. That order is what
/// positional frame lookup uses; temporal ordering is derived separately by
/// parsing the keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticleSnapshotSet {
    steps: IndexMap<String, Vec<ParticleRecord>>,
}

impl ParticleSnapshotSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `{ "stepKey": [[...], ...], ... }` JSON document.
    pub fn from_json_str(json: &str) -> DispersionResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON dataset from disk.
    pub fn from_file(path: impl AsRef<Path>) -> DispersionResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Add a step. Re-inserting an existing key replaces its particles and
    /// keeps the key's original position.
    pub fn insert(&mut self, key: impl Into<String>, particles: Vec<ParticleRecord>) {
        self.steps.insert(key.into(), particles);
    }

    /// Number of distinct time-step keys.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step_keys(&self) -> impl Iterator<Item = &str> {
        self.steps.keys().map(String::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&[ParticleRecord]> {
        self.steps.get(key).map(Vec::as_slice)
    }

    /// Step at position `index` in key order.
    pub fn frame(&self, index: usize) -> Option<(&str, &[ParticleRecord])> {
        self.steps
            .get_index(index)
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Steps in key order.
    pub fn steps(&self) -> impl Iterator<Item = (&str, &[ParticleRecord])> {
        self.steps.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Steps in ascending time order.
    ///
    /// Keys that do not parse as timestamps sort after all parseable keys.
    /// Equal timestamps (and unparseable keys among themselves) keep their
    /// key order.
    pub fn ordered_steps(&self) -> Vec<(&str, &[ParticleRecord])> {
        let mut keyed: Vec<(Option<DateTime<Utc>>, &str, &[ParticleRecord])> = self
            .steps()
            .map(|(k, v)| (parse_step_key(k).ok(), k, v))
            .collect();

        let unparsed = keyed.iter().filter(|(t, _, _)| t.is_none()).count();
        if unparsed > 0 {
            debug!(
                unparsed,
                total = keyed.len(),
                "Step keys not parseable as timestamps, ordering them last"
            );
        }

        keyed.sort_by(|(a, _, _), (b, _, _)| match (a, b) {
            (Some(a), Some(b)) => a.cmp(b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        keyed.into_iter().map(|(_, k, v)| (k, v)).collect()
    }

    /// Every `(stepKey, particle)` pair in ascending time order.
    pub fn flatten_ordered_by_time(&self) -> Vec<(&str, &ParticleRecord)> {
        self.ordered_steps()
            .into_iter()
            .flat_map(|(k, particles)| particles.iter().map(move |p| (k, p)))
            .collect()
    }

    /// Every particle occurrence in key order.
    pub fn flatten_unordered(&self) -> impl Iterator<Item = &ParticleRecord> {
        self.steps.values().flatten()
    }

    /// Sum of per-step particle counts.
    pub fn total_occurrences(&self) -> usize {
        self.steps.values().map(Vec::len).sum()
    }

    /// Distinct ids in order of first encounter.
    pub fn unique_particle_ids(&self, format: &DataFormat) -> Vec<ParticleId> {
        let mut seen = HashSet::new();
        self.flatten_unordered()
            .filter_map(|p| p.id(format))
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Positions of every particle occurrence, skipping short records.
    pub fn positions<'a>(&'a self, format: &'a DataFormat) -> impl Iterator<Item = LatLng> + 'a {
        self.flatten_unordered().filter_map(|p| p.position(format))
    }

    /// Bounding box of every position, or `None` when nothing is positioned.
    pub fn bounds(&self, format: &DataFormat) -> Option<BoundingBox> {
        BoundingBox::from_points(self.positions(format))
    }
}

impl FromIterator<(String, Vec<ParticleRecord>)> for ParticleSnapshotSet {
    fn from_iter<I: IntoIterator<Item = (String, Vec<ParticleRecord>)>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: f64, lon: f64, lat: f64) -> ParticleRecord {
        ParticleRecord::new(vec![id, lon, lat, 0.0, 0.0])
    }

    #[test]
    fn test_json_preserves_key_order() {
        let set = ParticleSnapshotSet::from_json_str(
            r#"{"2020-01-03":[[1,0,0,0,0]],"2020-01-01":[],"2020-01-02":[[2,1,1,0,0]]}"#,
        )
        .unwrap();
        let keys: Vec<_> = set.step_keys().collect();
        assert_eq!(keys, ["2020-01-03", "2020-01-01", "2020-01-02"]);
        assert_eq!(set.frame(2).unwrap().0, "2020-01-02");
        assert!(set.frame(3).is_none());
    }

    #[test]
    fn test_ordered_steps_sorts_by_time() {
        let set: ParticleSnapshotSet = [
            ("2020-01-03T00:00:00Z", vec![rec(1.0, 0.0, 0.0)]),
            ("2020-01-01T00:00:00Z", vec![rec(2.0, 0.0, 0.0)]),
            ("2020-01-02T00:00:00Z", vec![rec(3.0, 0.0, 0.0)]),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let keys: Vec<_> = set.ordered_steps().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            [
                "2020-01-01T00:00:00Z",
                "2020-01-02T00:00:00Z",
                "2020-01-03T00:00:00Z"
            ]
        );
    }

    #[test]
    fn test_unparseable_keys_sort_last_stably() {
        let mut set = ParticleSnapshotSet::new();
        set.insert("zulu", vec![]);
        set.insert("2020-01-02", vec![]);
        set.insert("alpha", vec![]);
        set.insert("2020-01-01", vec![]);

        let keys: Vec<_> = set.ordered_steps().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["2020-01-01", "2020-01-02", "zulu", "alpha"]);
    }

    #[test]
    fn test_reinsert_keeps_position() {
        let mut set = ParticleSnapshotSet::new();
        set.insert("a", vec![rec(1.0, 0.0, 0.0)]);
        set.insert("b", vec![]);
        set.insert("a", vec![rec(9.0, 0.0, 0.0), rec(8.0, 0.0, 0.0)]);

        assert_eq!(set.step_count(), 2);
        let (key, particles) = set.frame(0).unwrap();
        assert_eq!(key, "a");
        assert_eq!(particles.len(), 2);
    }

    #[test]
    fn test_unique_ids_first_encounter_order() {
        let mut set = ParticleSnapshotSet::new();
        set.insert("t0", vec![rec(3.0, 0.0, 0.0), rec(1.0, 0.0, 0.0)]);
        set.insert("t1", vec![rec(1.0, 0.0, 0.0), rec(2.0, 0.0, 0.0)]);

        let ids = set.unique_particle_ids(&DataFormat::default());
        assert_eq!(ids, vec![ParticleId(3.0), ParticleId(1.0), ParticleId(2.0)]);
        assert_eq!(set.total_occurrences(), 4);
    }

    #[test]
    fn test_bounds() {
        let mut set = ParticleSnapshotSet::new();
        set.insert("t0", vec![rec(1.0, 144.0, -38.0)]);
        set.insert("t1", vec![rec(1.0, 145.0, -37.5)]);
        let bounds = set.bounds(&DataFormat::default()).unwrap();
        assert_eq!(bounds, BoundingBox::new(144.0, -38.0, 145.0, -37.5));

        assert!(ParticleSnapshotSet::new()
            .bounds(&DataFormat::default())
            .is_none());
    }
}
