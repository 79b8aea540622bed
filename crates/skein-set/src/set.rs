//! The [`ParticleSet`] orchestrator.

use std::fmt;
use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;
use jiff::{SignedDuration, Timestamp};

use skein_core::{Dataset, OpenError, Pid, QueryError, ValueKind, Values, VarScope};
use skein_dense::DenseFrame;
use skein_index::{CountIndex, PidIndex};

use crate::preview::preview;
use crate::variable::{InstanceVariable, ParticleVariable, Variable};

/// Dataset variable holding the per-time-step instance counts.
const COUNT_VAR: &str = "particle_count";

/// Dataset variable holding the flat particle identifier sequence.
const PID_VAR: &str = "pid";

/// Conventional names of the horizontal position variables.
const X_VAR: &str = "X";
const Y_VAR: &str = "Y";

/// Positions of all particles present at one time step.
///
/// Both slices borrow from the set's `X`/`Y` variables and run in pid
/// order (the writer stores each step's block sorted by pid).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position<'a> {
    /// X coordinate per particle present.
    pub x: &'a [f64],
    /// Y coordinate per particle present.
    pub y: &'a [f64],
}

/// The full track of one particle across its lifetime.
///
/// All four sequences have one entry per time step the particle exists,
/// in increasing step order. Gaps are possible: a particle absent at an
/// intermediate step simply has no entry there.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    /// Time-step indexes where the particle exists.
    pub steps: Vec<usize>,
    /// The corresponding time coordinates.
    pub times: Vec<Timestamp>,
    /// X coordinate per step.
    pub x: Vec<f64>,
    /// Y coordinate per step.
    pub y: Vec<f64>,
}

impl Trajectory {
    /// Number of steps the particle was observed at.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the trajectory holds no observations.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// An opened ragged particle-tracking output source.
///
/// Owns everything it read: the shared [`CountIndex`], the time
/// coordinates, the flat pid sequence, and one [`Variable`] per dataset
/// variable. The dataset handle itself is not retained — all data is
/// copied out at open time, and dropping the set releases it all.
///
/// Per-step queries cost O(1) offset arithmetic. The first per-particle
/// query builds the [`PidIndex`] with one O(total) pass and caches it for
/// the set's lifetime; the `OnceLock` guard keeps that a single build even
/// under concurrent first access.
#[derive(Debug)]
pub struct ParticleSet {
    index: Arc<CountIndex>,
    times: Vec<Timestamp>,
    pids: Vec<Pid>,
    variables: IndexMap<String, Variable>,
    pid_index: OnceLock<PidIndex>,
}

impl ParticleSet {
    /// Open a particle set from a dataset.
    ///
    /// Reads the count sequence, the time coordinate, the pid sequence,
    /// and every variable the dataset lists, validating lengths against
    /// the count index and rejecting negative counts and pids. The
    /// reverse pid index is *not* built here; it is deferred to the first
    /// per-particle query.
    pub fn open<D: Dataset>(dataset: &D) -> Result<Self, OpenError> {
        let raw_counts = dataset.int_sequence(COUNT_VAR)?;
        let index = Arc::new(CountIndex::from_counts(&raw_counts)?);

        let times = dataset.time_coords()?;
        if times.len() != index.num_steps() {
            return Err(OpenError::LengthMismatch {
                name: "time".into(),
                expected: index.num_steps(),
                actual: times.len(),
            });
        }

        let raw_pids = dataset.int_sequence(PID_VAR)?;
        if raw_pids.len() != index.total() {
            return Err(OpenError::LengthMismatch {
                name: PID_VAR.into(),
                expected: index.total(),
                actual: raw_pids.len(),
            });
        }
        let mut pids = Vec::with_capacity(raw_pids.len());
        for (position, &value) in raw_pids.iter().enumerate() {
            if value < 0 {
                return Err(OpenError::NegativePid { position, value });
            }
            pids.push(Pid(value as u64));
        }

        let mut variables = IndexMap::new();
        for name in dataset.variable_names() {
            let Some(scope) = dataset.scope(&name) else {
                continue;
            };
            let variable = match (scope, dataset.sequence(&name)?) {
                (VarScope::Instance, Values::Float(v)) => Variable::InstanceFloat(
                    InstanceVariable::new(name.clone(), v, Arc::clone(&index))?,
                ),
                (VarScope::Instance, Values::Int(v)) => Variable::InstanceInt(
                    InstanceVariable::new(name.clone(), v, Arc::clone(&index))?,
                ),
                (VarScope::Particle, Values::Float(v)) => {
                    Variable::ParticleFloat(ParticleVariable::new(name.clone(), v))
                }
                (VarScope::Particle, Values::Int(v)) => {
                    Variable::ParticleInt(ParticleVariable::new(name.clone(), v))
                }
            };
            variables.insert(name, variable);
        }

        Ok(Self {
            index,
            times,
            pids,
            variables,
            pid_index: OnceLock::new(),
        })
    }

    /// Number of time steps.
    pub fn num_steps(&self) -> usize {
        self.index.num_steps()
    }

    /// Total number of particle instances across all steps.
    pub fn num_instances(&self) -> usize {
        self.index.total()
    }

    /// Number of distinct particles. Forces the reverse index build.
    pub fn num_particles(&self) -> usize {
        self.pid_index().num_particles()
    }

    /// The shared count index.
    pub fn count_index(&self) -> &CountIndex {
        &self.index
    }

    /// Number of particles present at step `step`.
    pub fn count_at(&self, step: usize) -> Result<usize, QueryError> {
        self.index.count(step)
    }

    /// The full time coordinate.
    pub fn times(&self) -> &[Timestamp] {
        &self.times
    }

    /// Time coordinate of step `step`.
    pub fn time(&self, step: usize) -> Result<Timestamp, QueryError> {
        self.times
            .get(step)
            .copied()
            .ok_or(QueryError::StepOutOfRange {
                step,
                num_steps: self.num_steps(),
            })
    }

    /// Resolve a time value to its step index by exact match.
    ///
    /// There is no silent snapping: a timestamp between two coordinates
    /// fails with [`QueryError::TimeNotFound`]. Callers wanting tolerance
    /// opt in through [`step_for_time_near`](Self::step_for_time_near).
    pub fn step_for_time(&self, time: Timestamp) -> Result<usize, QueryError> {
        self.times
            .iter()
            .position(|&t| t == time)
            .ok_or(QueryError::TimeNotFound { time })
    }

    /// Resolve a time value to the nearest step within `tolerance`.
    ///
    /// Exact-tie distances resolve to the earlier step. Fails with
    /// [`QueryError::TimeNotFound`] when no coordinate lies within the
    /// tolerance.
    pub fn step_for_time_near(
        &self,
        time: Timestamp,
        tolerance: SignedDuration,
    ) -> Result<usize, QueryError> {
        let target = time.as_nanosecond();
        let best = self
            .times
            .iter()
            .enumerate()
            .map(|(n, t)| ((t.as_nanosecond() - target).abs(), n))
            .min();
        match best {
            Some((dist, step)) if dist <= tolerance.as_nanos().abs() => Ok(step),
            _ => Err(QueryError::TimeNotFound { time }),
        }
    }

    /// Look up a variable by name.
    pub fn get(&self, name: &str) -> Result<&Variable, QueryError> {
        self.variables
            .get(name)
            .ok_or_else(|| QueryError::UnknownVariable { name: name.into() })
    }

    /// All variables, in dataset order.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }

    /// Look up a float instance variable by name.
    pub fn instance_float(&self, name: &str) -> Result<&InstanceVariable<f64>, QueryError> {
        self.get(name)?
            .as_instance_float()
            .ok_or_else(|| QueryError::KindMismatch {
                name: name.into(),
                requested: ValueKind::Float,
            })
    }

    /// Look up an integer instance variable by name.
    pub fn instance_int(&self, name: &str) -> Result<&InstanceVariable<i64>, QueryError> {
        self.get(name)?
            .as_instance_int()
            .ok_or_else(|| QueryError::KindMismatch {
                name: name.into(),
                requested: ValueKind::Int,
            })
    }

    /// The flat pid sequence.
    pub fn pids(&self) -> &[Pid] {
        &self.pids
    }

    /// Identifiers of the particles present at step `step`, in storage
    /// (increasing pid) order.
    pub fn pid_at_step(&self, step: usize) -> Result<&[Pid], QueryError> {
        Ok(&self.pids[self.index.range(step)?])
    }

    /// The reverse pid index, built on first use and cached.
    pub fn pid_index(&self) -> &PidIndex {
        self.pid_index
            .get_or_init(|| PidIndex::build(&self.pids, &self.index))
    }

    /// Positions of all particles present at step `step`.
    ///
    /// Requires the conventional `X`/`Y` float instance variables.
    pub fn position(&self, step: usize) -> Result<Position<'_>, QueryError> {
        Ok(Position {
            x: self.instance_float(X_VAR)?.at_step(step)?,
            y: self.instance_float(Y_VAR)?.at_step(step)?,
        })
    }

    /// Positions at an exactly matching time value.
    pub fn position_at_time(&self, time: Timestamp) -> Result<Position<'_>, QueryError> {
        self.position(self.step_for_time(time)?)
    }

    /// The full track of one particle.
    ///
    /// Fails with [`QueryError::UnknownPid`] when the identifier never
    /// appears in the set.
    pub fn trajectory(&self, pid: Pid) -> Result<Trajectory, QueryError> {
        let refs = self.pid_index().lookup(pid);
        if refs.is_empty() {
            return Err(QueryError::UnknownPid { pid });
        }
        let x = self.instance_float(X_VAR)?;
        let y = self.instance_float(Y_VAR)?;
        let mut traj = Trajectory {
            steps: Vec::with_capacity(refs.len()),
            times: Vec::with_capacity(refs.len()),
            x: Vec::with_capacity(refs.len()),
            y: Vec::with_capacity(refs.len()),
        };
        for r in refs {
            traj.steps.push(r.step);
            traj.times.push(self.times[r.step]);
            traj.x.push(x.values()[r.pos]);
            traj.y.push(y.values()[r.pos]);
        }
        Ok(traj)
    }

    /// Densify a float instance variable, filling absent cells with `fill`
    /// (conventionally `f64::NAN`).
    pub fn dense_float(&self, name: &str, fill: f64) -> Result<DenseFrame<f64>, QueryError> {
        Ok(self.instance_float(name)?.to_dense(self.pid_index(), fill))
    }

    /// Densify an integer instance variable with an explicit sentinel.
    pub fn dense_int(&self, name: &str, fill: i64) -> Result<DenseFrame<i64>, QueryError> {
        Ok(self.instance_int(name)?.to_dense(self.pid_index(), fill))
    }
}

impl fmt::Display for ParticleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<skein.ParticleSet>")?;
        writeln!(
            f,
            "num_steps: {}, num_instances: {}",
            self.num_steps(),
            self.num_instances()
        )?;
        writeln!(f, "time: {}", preview(&self.times))?;
        writeln!(f, "count: {}", preview(self.index.counts()))?;
        writeln!(f, "Instance variables:")?;
        for v in self.variables() {
            if v.scope() == VarScope::Instance {
                writeln!(f, "  {:16} {} [{}]", v.name(), v.kind(), v.len())?;
            }
        }
        writeln!(f, "Particle variables:")?;
        for v in self.variables() {
            if v.scope() == VarScope::Particle {
                writeln!(f, "  {:16} {} [{}]", v.name(), v.kind(), v.len())?;
            }
        }
        Ok(())
    }
}
