//! Particle snapshot dataset model.
//!
//! A dataset maps time-step keys to the particle records observed at that
//! step. Records are fixed-arity numeric tuples whose fields are located
//! through a [`DataFormat`].

pub mod dataset;
pub mod format;
pub mod record;

pub use dataset::ParticleSnapshotSet;
pub use format::{DataFormat, DataFormatError, Field};
pub use record::{ParticleId, ParticleRecord};
