//! The [`Pid`] particle identifier newtype.

use std::fmt;

/// Identifies a single particle across its lifetime.
///
/// Identifiers are assigned by the simulation at release time and are never
/// reused after a particle terminates. Higher identifiers denote
/// later-released particles. Within the instance block of any single time
/// step the identifiers are sorted in increasing order; this is a property
/// of the writer, not something the readers here enforce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pid(pub u64);

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Pid {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
