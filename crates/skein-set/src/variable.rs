//! Typed views over dataset variables.
//!
//! Two kinds of variable come out of ragged tracking output:
//!
//! - [`InstanceVariable`]: one value per particle *instance* (particle ×
//!   time step) — positions, temperature, age. These share the set's
//!   [`CountIndex`] and support per-step slicing, per-particle gathering,
//!   and densification. The pid sequence itself is an instance variable.
//! - [`ParticleVariable`]: one value per particle for its whole lifetime —
//!   release position, species code. Indexed positionally by pid.

use std::ops::Range;
use std::sync::Arc;

use skein_core::{OpenError, Pid, QueryError, ValueKind, VarScope};
use skein_dense::DenseFrame;
use skein_index::{CountIndex, PidIndex};

/// One observation of a particle variable value: which step it was taken
/// at and the value itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample<T> {
    /// Time-step index of the observation.
    pub step: usize,
    /// Observed value.
    pub value: T,
}

/// A named, time-dependent variable in ragged instance order.
///
/// Owns its values; borrows nothing from the dataset. The count index is
/// shared with the owning set and every sibling variable through an `Arc`
/// — it is built once at open time and never copied.
#[derive(Clone, Debug)]
pub struct InstanceVariable<T> {
    name: String,
    values: Vec<T>,
    index: Arc<CountIndex>,
}

impl<T: Copy> InstanceVariable<T> {
    /// Wrap a raw value sequence.
    ///
    /// The sequence must have exactly one element per particle instance,
    /// i.e. its length must equal the index total.
    pub fn new(
        name: impl Into<String>,
        values: Vec<T>,
        index: Arc<CountIndex>,
    ) -> Result<Self, OpenError> {
        let name = name.into();
        if values.len() != index.total() {
            return Err(OpenError::LengthMismatch {
                name,
                expected: index.total(),
                actual: values.len(),
            });
        }
        Ok(Self {
            name,
            values,
            index,
        })
    }

    /// Variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full flat value sequence, in storage (time-major) order.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Total number of particle instances.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the variable holds no instances at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of time steps.
    pub fn num_steps(&self) -> usize {
        self.index.num_steps()
    }

    /// The shared count index.
    pub fn count_index(&self) -> &CountIndex {
        &self.index
    }

    /// Values of all particles present at step `step` — a zero-copy
    /// sub-slice of the flat sequence.
    pub fn at_step(&self, step: usize) -> Result<&[T], QueryError> {
        Ok(&self.values[self.index.range(step)?])
    }

    /// An owned sub-variable covering a contiguous run of steps, with a
    /// rebased count index.
    pub fn step_slice(&self, steps: Range<usize>) -> Result<Self, QueryError> {
        let span = self.index.span(steps.clone())?;
        let index = Arc::new(self.index.slice(steps)?);
        Ok(Self {
            name: self.name.clone(),
            values: self.values[span].to_vec(),
            index,
        })
    }

    /// This variable's value at every step where `pid` exists, in step
    /// order. A pid that never appears is an error here; use
    /// [`PidIndex::lookup`] directly when absence is expected.
    pub fn select_pid(&self, pids: &PidIndex, pid: Pid) -> Result<Vec<Sample<T>>, QueryError> {
        let refs = pids.lookup(pid);
        if refs.is_empty() {
            return Err(QueryError::UnknownPid { pid });
        }
        Ok(refs
            .iter()
            .map(|r| Sample {
                step: r.step,
                value: self.values[r.pos],
            })
            .collect())
    }

    /// Materialize onto the dense (step × pid) grid with `fill` at every
    /// absent cell. Built fresh on every call; see the `skein-dense` crate
    /// docs for the size caveat.
    pub fn to_dense(&self, pids: &PidIndex, fill: T) -> DenseFrame<T> {
        DenseFrame::densify(&self.values, &self.index, pids, fill)
    }
}

/// A named, time-independent per-particle variable.
///
/// Values are indexed positionally: the value for `Pid(p)` sits at index
/// `p`. Writers emit one element per released particle, so the sequence
/// length is `max_pid + 1` even when some particles have terminated.
#[derive(Clone, Debug)]
pub struct ParticleVariable<T> {
    name: String,
    values: Vec<T>,
}

impl<T: Copy> ParticleVariable<T> {
    /// Wrap a raw per-particle sequence.
    pub fn new(name: impl Into<String>, values: Vec<T>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full per-particle sequence.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Number of particles covered.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value for one particle, or `None` when `pid` is outside the
    /// recorded range.
    pub fn get(&self, pid: Pid) -> Option<T> {
        self.values.get(pid.0 as usize).copied()
    }
}

/// Any variable held by a set, tagged by scope and element type.
#[derive(Clone, Debug)]
pub enum Variable {
    /// Float instance variable (positions, environmental fields).
    InstanceFloat(InstanceVariable<f64>),
    /// Integer instance variable (pid, categorical codes).
    InstanceInt(InstanceVariable<i64>),
    /// Float particle variable (release coordinates, weights).
    ParticleFloat(ParticleVariable<f64>),
    /// Integer particle variable (species codes, release steps).
    ParticleInt(ParticleVariable<i64>),
}

impl Variable {
    /// Variable name.
    pub fn name(&self) -> &str {
        match self {
            Self::InstanceFloat(v) => v.name(),
            Self::InstanceInt(v) => v.name(),
            Self::ParticleFloat(v) => v.name(),
            Self::ParticleInt(v) => v.name(),
        }
    }

    /// Which dimension the variable is defined along.
    pub fn scope(&self) -> VarScope {
        match self {
            Self::InstanceFloat(_) | Self::InstanceInt(_) => VarScope::Instance,
            Self::ParticleFloat(_) | Self::ParticleInt(_) => VarScope::Particle,
        }
    }

    /// Element type.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::InstanceFloat(_) | Self::ParticleFloat(_) => ValueKind::Float,
            Self::InstanceInt(_) | Self::ParticleInt(_) => ValueKind::Int,
        }
    }

    /// Number of elements (instances or particles, per scope).
    pub fn len(&self) -> usize {
        match self {
            Self::InstanceFloat(v) => v.len(),
            Self::InstanceInt(v) => v.len(),
            Self::ParticleFloat(v) => v.len(),
            Self::ParticleInt(v) => v.len(),
        }
    }

    /// Whether the variable holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Downcast to a float instance variable.
    pub fn as_instance_float(&self) -> Option<&InstanceVariable<f64>> {
        match self {
            Self::InstanceFloat(v) => Some(v),
            _ => None,
        }
    }

    /// Downcast to an integer instance variable.
    pub fn as_instance_int(&self) -> Option<&InstanceVariable<i64>> {
        match self {
            Self::InstanceInt(v) => Some(v),
            _ => None,
        }
    }

    /// Downcast to a float particle variable.
    pub fn as_particle_float(&self) -> Option<&ParticleVariable<f64>> {
        match self {
            Self::ParticleFloat(v) => Some(v),
            _ => None,
        }
    }

    /// Downcast to an integer particle variable.
    pub fn as_particle_int(&self) -> Option<&ParticleVariable<i64>> {
        match self {
            Self::ParticleInt(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared_index() -> Arc<CountIndex> {
        Arc::new(CountIndex::from_counts(&[2, 1, 2]).unwrap())
    }

    #[test]
    fn at_step_slices_flat_values() {
        let index = shared_index();
        let v = InstanceVariable::new("X", vec![1.0, 2.0, 3.0, 4.0, 5.0], index).unwrap();
        assert_eq!(v.at_step(0).unwrap(), &[1.0, 2.0]);
        assert_eq!(v.at_step(1).unwrap(), &[3.0]);
        assert_eq!(v.at_step(2).unwrap(), &[4.0, 5.0]);
        assert!(matches!(
            v.at_step(3),
            Err(QueryError::StepOutOfRange { step: 3, .. })
        ));
    }

    #[test]
    fn length_must_match_index() {
        let index = shared_index();
        let err = InstanceVariable::new("X", vec![1.0, 2.0], index).unwrap_err();
        assert_eq!(
            err,
            OpenError::LengthMismatch {
                name: "X".into(),
                expected: 5,
                actual: 2
            }
        );
    }

    #[test]
    fn step_slice_rebases() {
        let index = shared_index();
        let v = InstanceVariable::new("X", vec![1.0, 2.0, 3.0, 4.0, 5.0], index).unwrap();
        let sub = v.step_slice(1..3).unwrap();
        assert_eq!(sub.num_steps(), 2);
        assert_eq!(sub.values(), &[3.0, 4.0, 5.0]);
        assert_eq!(sub.at_step(0).unwrap(), &[3.0]);
        assert_eq!(sub.at_step(1).unwrap(), &[4.0, 5.0]);
    }

    #[test]
    fn select_pid_gathers_samples() {
        let index = shared_index();
        let pid_seq = [10, 11, 11, 10, 12].map(Pid);
        let pid_index = PidIndex::build(&pid_seq, &index);
        let v = InstanceVariable::new("X", vec![1.0, 2.0, 3.0, 4.0, 5.0], index).unwrap();

        let samples = v.select_pid(&pid_index, Pid(10)).unwrap();
        assert_eq!(
            samples,
            vec![
                Sample {
                    step: 0,
                    value: 1.0
                },
                Sample {
                    step: 2,
                    value: 4.0
                }
            ]
        );

        assert_eq!(
            v.select_pid(&pid_index, Pid(99)),
            Err(QueryError::UnknownPid { pid: Pid(99) })
        );
    }

    #[test]
    fn particle_variable_positional_access() {
        let v = ParticleVariable::new("release_x", vec![0.5, 1.5, 2.5]);
        assert_eq!(v.get(Pid(1)), Some(1.5));
        assert_eq!(v.get(Pid(3)), None);
        assert_eq!(v.len(), 3);
    }

    #[test]
    fn variable_tags() {
        let index = shared_index();
        let v = Variable::InstanceInt(
            InstanceVariable::new("pid", vec![10, 11, 11, 10, 12], index).unwrap(),
        );
        assert_eq!(v.name(), "pid");
        assert_eq!(v.scope(), VarScope::Instance);
        assert_eq!(v.kind(), ValueKind::Int);
        assert_eq!(v.len(), 5);
        assert!(v.as_instance_int().is_some());
        assert!(v.as_instance_float().is_none());
    }
}
