//! Test utilities and mock datasets for skein development.
//!
//! Provides [`MemoryDataset`], an in-memory implementation of the
//! [`Dataset`] trait with a builder-style API, plus shared fixtures for
//! the reference ragged layout used across the workspace's tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod fixtures;

pub use fixtures::{reference_dataset, reference_times};

use indexmap::IndexMap;
use jiff::Timestamp;

use skein_core::{Dataset, OpenError, Values, VarScope};

/// In-memory [`Dataset`] for tests.
///
/// Build with the chainable `with_*` methods, then hand a reference to
/// `ParticleSet::open`. The count sequence is installed by [`new`]
/// (`MemoryDataset::new`) under the conventional `particle_count` name;
/// the pid sequence goes in like any other instance variable.
pub struct MemoryDataset {
    counts: Vec<i64>,
    times: Vec<Timestamp>,
    variables: IndexMap<String, (VarScope, Values)>,
}

impl MemoryDataset {
    /// A dataset with the given per-step counts and evenly spaced hourly
    /// time coordinates starting at the Unix epoch.
    pub fn new(counts: Vec<i64>) -> Self {
        let times = (0..counts.len() as i64)
            .map(|n| Timestamp::UNIX_EPOCH + jiff::SignedDuration::from_hours(n))
            .collect();
        Self {
            counts,
            times,
            variables: IndexMap::new(),
        }
    }

    /// Replace the time coordinates.
    pub fn with_times(mut self, times: Vec<Timestamp>) -> Self {
        self.times = times;
        self
    }

    /// Add a float instance variable.
    pub fn with_instance_float(mut self, name: &str, values: Vec<f64>) -> Self {
        self.variables
            .insert(name.into(), (VarScope::Instance, Values::Float(values)));
        self
    }

    /// Add an integer instance variable.
    pub fn with_instance_int(mut self, name: &str, values: Vec<i64>) -> Self {
        self.variables
            .insert(name.into(), (VarScope::Instance, Values::Int(values)));
        self
    }

    /// Add a float particle variable.
    pub fn with_particle_float(mut self, name: &str, values: Vec<f64>) -> Self {
        self.variables
            .insert(name.into(), (VarScope::Particle, Values::Float(values)));
        self
    }

    /// Add an integer particle variable.
    pub fn with_particle_int(mut self, name: &str, values: Vec<i64>) -> Self {
        self.variables
            .insert(name.into(), (VarScope::Particle, Values::Int(values)));
        self
    }
}

impl Dataset for MemoryDataset {
    fn variable_names(&self) -> Vec<String> {
        self.variables.keys().cloned().collect()
    }

    fn scope(&self, name: &str) -> Option<VarScope> {
        self.variables.get(name).map(|(scope, _)| *scope)
    }

    fn int_sequence(&self, name: &str) -> Result<Vec<i64>, OpenError> {
        if name == "particle_count" {
            return Ok(self.counts.clone());
        }
        match self.variables.get(name) {
            Some((_, Values::Int(v))) => Ok(v.clone()),
            _ => Err(OpenError::MissingVariable { name: name.into() }),
        }
    }

    fn sequence(&self, name: &str) -> Result<Values, OpenError> {
        self.variables
            .get(name)
            .map(|(_, values)| values.clone())
            .ok_or_else(|| OpenError::MissingVariable { name: name.into() })
    }

    fn time_coords(&self) -> Result<Vec<Timestamp>, OpenError> {
        Ok(self.times.clone())
    }
}
