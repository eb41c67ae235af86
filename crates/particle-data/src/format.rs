//! Positional field layout of particle records.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Logical particle fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Id,
    Longitude,
    Latitude,
    Depth,
    Age,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Longitude => "longitude",
            Field::Latitude => "latitude",
            Field::Depth => "depth",
            Field::Age => "age",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps logical fields to positions within a particle record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFormat {
    pub id_index: usize,
    #[serde(alias = "longitudeIndex")]
    pub lon_index: usize,
    #[serde(alias = "latitudeIndex")]
    pub lat_index: usize,
    pub depth_index: usize,
    pub age_index: usize,
}

impl Default for DataFormat {
    /// `[id, lon, lat, depth, age]`
    fn default() -> Self {
        Self {
            id_index: 0,
            lon_index: 1,
            lat_index: 2,
            depth_index: 3,
            age_index: 4,
        }
    }
}

impl DataFormat {
    pub fn index_of(&self, field: Field) -> usize {
        match field {
            Field::Id => self.id_index,
            Field::Longitude => self.lon_index,
            Field::Latitude => self.lat_index,
            Field::Depth => self.depth_index,
            Field::Age => self.age_index,
        }
    }

    /// Check that every field in `required` has its own position.
    pub fn validate(&self, required: &[Field]) -> Result<(), DataFormatError> {
        for (i, a) in required.iter().enumerate() {
            for b in &required[i + 1..] {
                if a != b && self.index_of(*a) == self.index_of(*b) {
                    return Err(DataFormatError::SharedIndex {
                        first: *a,
                        second: *b,
                        index: self.index_of(*a),
                    });
                }
            }
        }
        Ok(())
    }

    /// Number of values a record needs to carry every field in `required`.
    pub fn min_arity(&self, required: &[Field]) -> usize {
        required
            .iter()
            .map(|f| self.index_of(*f) + 1)
            .max()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataFormatError {
    #[error("fields '{first}' and '{second}' both map to index {index}")]
    SharedIndex {
        first: Field,
        second: Field,
        index: usize,
    },
}
