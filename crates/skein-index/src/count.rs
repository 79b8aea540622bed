//! Prefix-sum offset table over per-time-step particle counts.

use std::ops::Range;

use skein_core::{OpenError, QueryError};

/// Offset table mapping time steps to flat instance ranges.
///
/// Built once from the raw `particle_count` sequence when a collection is
/// opened, immutable afterwards. `offsets` has one more element than
/// `counts`: `offsets[0] == 0` and `offsets[n + 1] - offsets[n] ==
/// counts[n]`, so step `n` owns the flat half-open range
/// `offsets[n]..offsets[n + 1]` and `offsets[T]` is the total instance
/// count. Every instance variable sharing this index has exactly that many
/// elements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountIndex {
    counts: Vec<usize>,
    offsets: Vec<usize>,
}

impl CountIndex {
    /// Build the index from a raw count sequence.
    ///
    /// Counts come straight off the wire as signed integers; a negative
    /// value means the source is corrupt and the open must fail.
    pub fn from_counts(raw: &[i64]) -> Result<Self, OpenError> {
        let mut counts = Vec::with_capacity(raw.len());
        let mut offsets = Vec::with_capacity(raw.len() + 1);
        let mut running = 0usize;
        offsets.push(0);
        for (step, &value) in raw.iter().enumerate() {
            if value < 0 {
                return Err(OpenError::NegativeCount { step, value });
            }
            let count = value as usize;
            counts.push(count);
            running += count;
            offsets.push(running);
        }
        Ok(Self { counts, offsets })
    }

    /// Number of time steps `T`.
    pub fn num_steps(&self) -> usize {
        self.counts.len()
    }

    /// Total number of particle instances across all steps.
    pub fn total(&self) -> usize {
        *self.offsets.last().unwrap_or(&0)
    }

    /// Per-step counts.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Number of particles present at step `n`.
    pub fn count(&self, step: usize) -> Result<usize, QueryError> {
        self.counts
            .get(step)
            .copied()
            .ok_or(QueryError::StepOutOfRange {
                step,
                num_steps: self.num_steps(),
            })
    }

    /// Flat range owned by step `n`. Empty steps yield an empty range.
    pub fn range(&self, step: usize) -> Result<Range<usize>, QueryError> {
        if step >= self.num_steps() {
            return Err(QueryError::StepOutOfRange {
                step,
                num_steps: self.num_steps(),
            });
        }
        Ok(self.offsets[step]..self.offsets[step + 1])
    }

    /// Flat range covered by a contiguous run of steps.
    pub fn span(&self, steps: Range<usize>) -> Result<Range<usize>, QueryError> {
        self.check_steps(&steps)?;
        Ok(self.offsets[steps.start]..self.offsets[steps.end])
    }

    /// The time step owning flat position `pos`.
    ///
    /// Binary search over the offset table. Zero-count steps own no
    /// positions, so they are never returned.
    pub fn step_at(&self, pos: usize) -> Result<usize, QueryError> {
        if pos >= self.total() {
            return Err(QueryError::PositionOutOfRange {
                position: pos,
                total: self.total(),
            });
        }
        // First offset strictly greater than pos marks the owning step's end.
        Ok(self.offsets.partition_point(|&o| o <= pos) - 1)
    }

    /// A rebased sub-index covering only `steps`.
    ///
    /// Used for step-slicing a variable: the slice's offsets restart at
    /// zero, matching a values buffer cut down to [`span`](Self::span).
    pub fn slice(&self, steps: Range<usize>) -> Result<Self, QueryError> {
        self.check_steps(&steps)?;
        let base = self.offsets[steps.start];
        let counts = self.counts[steps.clone()].to_vec();
        let offsets = self.offsets[steps.start..=steps.end]
            .iter()
            .map(|&o| o - base)
            .collect();
        Ok(Self { counts, offsets })
    }

    /// Iterate over the flat range of every step, in step order.
    pub fn iter_ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.offsets.windows(2).map(|w| w[0]..w[1])
    }

    /// Validate a step range: the end must be within bounds and the range
    /// must not be inverted. The reported step is whichever bound is
    /// actually offending — the end when it exceeds `num_steps`, the
    /// start when it overshoots the end.
    fn check_steps(&self, steps: &Range<usize>) -> Result<(), QueryError> {
        if steps.start > steps.end || steps.end > self.num_steps() {
            return Err(QueryError::StepOutOfRange {
                step: steps.start.max(steps.end),
                num_steps: self.num_steps(),
            });
        }
        Ok(())
    }
}
