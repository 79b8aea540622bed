//! The [`DenseFrame`] grid and its construction.

use skein_core::Pid;
use skein_index::{CountIndex, PidIndex};

/// A dense row-major (time step × particle) grid of one variable.
///
/// Columns cover the **compact sorted distinct-pid set**, not the
/// contiguous `[min_pid, max_pid]` range: sparse identifier spaces would
/// otherwise pay for columns no particle ever uses. The column → pid
/// mapping is carried in the frame ([`columns`](Self::columns)) so callers
/// can interpret the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct DenseFrame<T> {
    num_steps: usize,
    columns: Vec<Pid>,
    data: Vec<T>,
    fill: T,
}

impl<T: Copy> DenseFrame<T> {
    /// Materialize a ragged value sequence onto the dense grid.
    ///
    /// Every cell starts at `fill`; one O(total) sweep over the reverse
    /// index then writes each observation into its (step, column) cell.
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != index.total()` — the pairing every
    /// in-tree caller guarantees by construction.
    pub fn densify(values: &[T], index: &CountIndex, pids: &PidIndex, fill: T) -> Self {
        assert_eq!(
            values.len(),
            index.total(),
            "values length disagrees with count index"
        );
        let columns = pids.sorted_pids();
        let num_steps = index.num_steps();
        let num_columns = columns.len();
        let mut data = vec![fill; num_steps * num_columns];
        for (col, &pid) in columns.iter().enumerate() {
            for r in pids.lookup(pid) {
                data[r.step * num_columns + col] = values[r.pos];
            }
        }
        Self {
            num_steps,
            columns,
            data,
            fill,
        }
    }

    /// Number of rows (time steps).
    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    /// Number of columns (distinct particles).
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// The pid each column corresponds to, in increasing pid order.
    pub fn columns(&self) -> &[Pid] {
        &self.columns
    }

    /// Column of `pid`, or `None` if the particle never appears.
    pub fn column_of(&self, pid: Pid) -> Option<usize> {
        self.columns.binary_search(&pid).ok()
    }

    /// The fill value used for absent cells.
    pub fn fill(&self) -> T {
        self.fill
    }

    /// One row of the grid: the value of every particle at step `step`.
    ///
    /// Returns `None` when `step` is out of range.
    pub fn row(&self, step: usize) -> Option<&[T]> {
        if step >= self.num_steps {
            return None;
        }
        let w = self.num_columns();
        Some(&self.data[step * w..(step + 1) * w])
    }

    /// Cell by (row, column), or `None` out of range.
    pub fn get(&self, step: usize, column: usize) -> Option<T> {
        if step >= self.num_steps || column >= self.num_columns() {
            return None;
        }
        Some(self.data[step * self.num_columns() + column])
    }

    /// Cell by (row, pid), or `None` when the pid has no column or the
    /// step is out of range. A pid that has a column but is absent at
    /// `step` yields the fill value, not `None`.
    pub fn value(&self, step: usize, pid: Pid) -> Option<T> {
        let col = self.column_of(pid)?;
        self.get(step, col)
    }

    /// The whole grid, row-major.
    pub fn data(&self) -> &[T] {
        &self.data
    }
}
