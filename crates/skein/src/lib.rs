//! Skein: a read-side toolkit for ragged particle-tracking output.
//!
//! Particle-tracking models write a variable-size particle set per time
//! step, concatenated into one flat `particle_instance` sequence with a
//! parallel per-step count array. Skein turns that ragged layout into a
//! query surface: per-step slices, per-particle trajectories, and dense
//! (time × pid) grids.
//!
//! This is the top-level facade crate re-exporting the public API from the
//! skein sub-crates. For most users, adding `skein` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use skein::prelude::*;
//!
//! # use skein_test_utils::reference_dataset;
//! # let dataset = reference_dataset();
//! // `dataset` is any implementor of the `Dataset` trait.
//! let set = ParticleSet::open(&dataset).unwrap();
//!
//! // Per-step view: positions of everything alive at step 0.
//! let pos = set.position(0).unwrap();
//! assert_eq!(pos.x.len(), set.count_at(0).unwrap());
//!
//! // Per-particle view: one particle's track across its lifetime.
//! let track = set.trajectory(Pid(10)).unwrap();
//! assert_eq!(track.steps, vec![0, 2]);
//!
//! // Dense view: a (time × pid) grid with NaN where a particle is absent.
//! let grid = set.dense_float("X", f64::NAN).unwrap();
//! assert_eq!(grid.num_steps(), set.num_steps());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `skein-core` | `Pid`, value model, `Dataset` trait, errors |
//! | [`index`] | `skein-index` | `CountIndex` offsets, `PidIndex` reverse map |
//! | [`dense`] | `skein-dense` | `DenseFrame` (time × pid) materialization |
//! | [`set`] | `skein-set` | `ParticleSet` orchestrator and variable views |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, the `Dataset` trait, and errors (`skein-core`).
pub use skein_core as types;

/// Ragged-layout indexes (`skein-index`).
///
/// [`index::CountIndex`] answers per-step range queries; [`index::PidIndex`]
/// inverts the time-major layout into per-particle occurrence lists.
pub use skein_index as index;

/// Dense materialization (`skein-dense`).
pub use skein_dense as dense;

/// The particle-set orchestrator and typed variable views (`skein-set`).
pub use skein_set as set;

/// Common imports for typical skein usage.
///
/// ```rust
/// use skein::prelude::*;
/// ```
pub mod prelude {
    pub use skein_core::{Dataset, OpenError, Pid, QueryError, ValueKind, Values, VarScope};
    pub use skein_dense::{cellcount, CellGrid, DenseFrame};
    pub use skein_index::{CountIndex, InstanceRef, PidIndex};
    pub use skein_set::{
        InstanceVariable, ParticleSet, ParticleVariable, Position, Sample, Trajectory, Variable,
    };
}
