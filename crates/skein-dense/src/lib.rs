//! Dense (time × pid) materialization of ragged particle variables.
//!
//! [`DenseFrame`] projects one ragged instance variable onto a fixed
//! 2D grid: one row per time step, one column per distinct particle
//! identifier, with a caller-chosen fill value at every (step, pid)
//! combination where the particle does not exist.
//!
//! The grid is O(T × particles) while the ragged source is O(instances);
//! with short particle lifespans relative to the run length the dense form
//! can be asymptotically larger than the data it was built from. Frames are
//! therefore built on demand and never cached by the collection.
//!
//! The crate also provides [`cellcount`], the step from a particle
//! distribution to a concentration field: weighted per-grid-cell counts
//! over integer cell coordinates.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod cell;
mod frame;

pub use cell::{cellcount, CellGrid};
pub use frame::DenseFrame;
