//! Particle-set orchestrator and variable views.
//!
//! [`ParticleSet::open`] reads a ragged particle-tracking output source
//! through the [`Dataset`](skein_core::Dataset) trait, builds the shared
//! [`CountIndex`](skein_index::CountIndex) once, and wraps every data
//! variable as a typed view. Per-step queries resolve through offset
//! arithmetic; per-particle queries resolve through the lazily built
//! [`PidIndex`](skein_index::PidIndex).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod preview;
mod set;
mod variable;

pub use set::{ParticleSet, Position, Trajectory};
pub use variable::{InstanceVariable, ParticleVariable, Sample, Variable};
