//! Indexes over the ragged particle-instance layout.
//!
//! Simulation output stores a variable-size particle set per time step,
//! concatenated into one flat `particle_instance` sequence with a parallel
//! per-step count array. This crate turns that layout into cheap lookups:
//!
//! - [`CountIndex`] converts the count array into a prefix-sum offset table,
//!   answering "which flat slice belongs to step `n`" in O(1) and "which
//!   step owns flat position `i`" in O(log T).
//! - [`PidIndex`] inverts the time-major storage order into a per-particle
//!   view: for each identifier, the ordered list of (step, flat position)
//!   pairs where it appears.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod count;
mod pid;

pub use count::CountIndex;
pub use pid::{InstanceRef, PidIndex};
