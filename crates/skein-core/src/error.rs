//! Error types for the skein particle-track toolkit.
//!
//! Two enums, split by phase: [`OpenError`] for malformed source data
//! detected while opening a collection (fatal — no set is produced), and
//! [`QueryError`] for caller-supplied bad queries against an opened set
//! (recoverable — the set stays usable).

use std::error::Error;
use std::fmt;

use jiff::Timestamp;

use crate::id::Pid;
use crate::value::ValueKind;

/// Errors detected while opening a particle set from a dataset.
///
/// All of these are fatal to the open: the source data violates the ragged
/// layout contract and no partial collection is returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OpenError {
    /// A required variable is absent from the dataset.
    MissingVariable {
        /// Name of the missing variable.
        name: String,
    },
    /// A per-time-step particle count is negative.
    NegativeCount {
        /// Time step holding the bad count.
        step: usize,
        /// The offending value.
        value: i64,
    },
    /// A particle identifier is negative.
    NegativePid {
        /// Flat position holding the bad identifier.
        position: usize,
        /// The offending value.
        value: i64,
    },
    /// A sequence length disagrees with the count index.
    LengthMismatch {
        /// Name of the offending variable.
        name: String,
        /// Length implied by the count index.
        expected: usize,
        /// Length actually read.
        actual: usize,
    },
}

impl fmt::Display for OpenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVariable { name } => write!(f, "missing variable '{name}'"),
            Self::NegativeCount { step, value } => {
                write!(f, "negative particle count {value} at time step {step}")
            }
            Self::NegativePid { position, value } => {
                write!(f, "negative pid {value} at flat position {position}")
            }
            Self::LengthMismatch {
                name,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "variable '{name}' has {actual} elements, count index implies {expected}"
                )
            }
        }
    }
}

impl Error for OpenError {}

/// Errors from queries against an opened particle set.
///
/// Each query either fully succeeds or fails with one of these; no partial
/// results are produced and nothing is retried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryError {
    /// A time-step index is outside `[0, num_steps)`.
    StepOutOfRange {
        /// The requested step.
        step: usize,
        /// Number of time steps in the set.
        num_steps: usize,
    },
    /// A flat instance position is outside `[0, total)`.
    PositionOutOfRange {
        /// The requested position.
        position: usize,
        /// Total number of particle instances.
        total: usize,
    },
    /// A time value matches no stored time coordinate.
    TimeNotFound {
        /// The requested time.
        time: Timestamp,
    },
    /// A particle identifier never appears in the set.
    UnknownPid {
        /// The requested identifier.
        pid: Pid,
    },
    /// A named variable does not exist in the set.
    UnknownVariable {
        /// The requested name.
        name: String,
    },
    /// A variable exists but not with the requested scope/element type.
    KindMismatch {
        /// Name of the variable.
        name: String,
        /// The element type that was requested.
        requested: ValueKind,
    },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StepOutOfRange { step, num_steps } => {
                write!(f, "time step {step} out of range (num_steps = {num_steps})")
            }
            Self::PositionOutOfRange { position, total } => {
                write!(f, "instance position {position} out of range (total = {total})")
            }
            Self::TimeNotFound { time } => write!(f, "no time step at {time}"),
            Self::UnknownPid { pid } => write!(f, "no particle with pid = {pid}"),
            Self::UnknownVariable { name } => write!(f, "no variable named '{name}'"),
            Self::KindMismatch { name, requested } => {
                write!(f, "variable '{name}' is not a {requested} instance variable")
            }
        }
    }
}

impl Error for QueryError {}
