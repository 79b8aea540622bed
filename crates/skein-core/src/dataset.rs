//! The [`Dataset`] collaborator trait.

use jiff::Timestamp;

use crate::error::OpenError;
use crate::value::Values;

/// Which dimension a variable is defined along.
///
/// Ragged simulation output distinguishes variables recorded once per
/// particle *instance* (particle × time step) from variables recorded once
/// per particle for its whole lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VarScope {
    /// One value per (particle, time step) pair — position, temperature, age.
    Instance,
    /// One value per particle — release location, species code.
    Particle,
}

impl std::fmt::Display for VarScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Instance => write!(f, "instance"),
            Self::Particle => write!(f, "particle"),
        }
    }
}

/// Read-only access to an already-opened simulation output source.
///
/// File opening, format negotiation, and decoding belong to implementors of
/// this trait; the retrieval engine only consumes named raw sequences from
/// it. A [`ParticleSet`] copies everything it needs out of the dataset at
/// open time, so implementors may release their underlying handle as soon
/// as `open` returns.
///
/// Two names are load-bearing by convention: `"particle_count"` must be
/// readable through [`int_sequence`](Dataset::int_sequence) and hold the
/// per-time-step instance counts, and `"pid"` must hold the flat particle
/// identifier sequence.
///
/// [`ParticleSet`]: https://docs.rs/skein-set
pub trait Dataset {
    /// Names of all data variables, in storage order.
    ///
    /// Coordinate and bookkeeping sequences (`time`, `particle_count`)
    /// should not be listed; they are fetched explicitly.
    fn variable_names(&self) -> Vec<String>;

    /// The scope of a named variable, or `None` if the name is unknown
    /// or the variable is defined along neither particle dimension.
    fn scope(&self, name: &str) -> Option<VarScope>;

    /// Read a named integer sequence.
    fn int_sequence(&self, name: &str) -> Result<Vec<i64>, OpenError>;

    /// Read a named value sequence of whatever element type it carries.
    fn sequence(&self, name: &str) -> Result<Values, OpenError>;

    /// The time coordinate, one timestamp per time step.
    fn time_coords(&self) -> Result<Vec<Timestamp>, OpenError>;
}
