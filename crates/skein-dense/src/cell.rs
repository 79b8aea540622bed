//! Particle-to-concentration binning over integer grid cells.
//!
//! [`cellcount`] turns a particle distribution into a concentration
//! field by counting (possibly weighted) particles per grid cell. Cells
//! are centered on integer grid coordinates: cell `c` covers
//! `[c - 0.5, c + 0.5)`.

/// A (possibly weighted) per-cell particle count.
///
/// Row-major over grid rows (`y`), columns (`x`); the grid origin
/// ([`x0`](Self::x0), [`y0`](Self::y0)) carries the cell coordinates of
/// the first column and row so callers can place the field.
#[derive(Clone, Debug, PartialEq)]
pub struct CellGrid {
    x0: i64,
    y0: i64,
    num_rows: usize,
    num_cols: usize,
    data: Vec<f64>,
}

impl CellGrid {
    /// Grid x coordinate of column 0.
    pub fn x0(&self) -> i64 {
        self.x0
    }

    /// Grid y coordinate of row 0.
    pub fn y0(&self) -> i64 {
        self.y0
    }

    /// Number of rows (y cells).
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of columns (x cells).
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// One row of counts, or `None` out of range.
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.num_rows {
            return None;
        }
        Some(&self.data[row * self.num_cols..(row + 1) * self.num_cols])
    }

    /// Count by (row, column) index, or `None` out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.num_rows || col >= self.num_cols {
            return None;
        }
        Some(self.data[row * self.num_cols + col])
    }

    /// Count in the cell at grid coordinates `(x, y)`, or `None` when
    /// the cell lies outside the grid.
    pub fn cell(&self, x: i64, y: i64) -> Option<f64> {
        let col = usize::try_from(x.checked_sub(self.x0)?).ok()?;
        let row = usize::try_from(y.checked_sub(self.y0)?).ok()?;
        self.get(row, col)
    }

    /// Sum over all cells — the total (weighted) count of particles
    /// that landed inside the grid.
    pub fn total(&self) -> f64 {
        self.data.iter().sum()
    }

    /// The whole field, row-major.
    pub fn data(&self) -> &[f64] {
        &self.data
    }
}

/// Count the (possibly weighted) number of particles in grid cells.
///
/// `x`/`y` are particle positions in grid coordinates, one pair per
/// particle; `weights` (same length) replaces the per-particle count of 1.
/// `limits` is `(x0, x1, y0, y1)`, restricting the grid to cells
/// `x0..x1` by `y0..y1`; `None` uses the bounding box of the positions
/// (rounded minima through rounded maxima). Particles outside the limits
/// are silently ignored.
///
/// # Panics
///
/// Panics when `y` (or `weights`, if given) does not match `x` in length.
pub fn cellcount(
    x: &[f64],
    y: &[f64],
    weights: Option<&[f64]>,
    limits: Option<(i64, i64, i64, i64)>,
) -> CellGrid {
    assert_eq!(x.len(), y.len(), "x and y lengths disagree");
    if let Some(w) = weights {
        assert_eq!(x.len(), w.len(), "x and weights lengths disagree");
    }

    let (x0, x1, y0, y1) = limits.unwrap_or_else(|| bounding_box(x, y));
    let num_cols = usize::try_from(x1 - x0).unwrap_or(0);
    let num_rows = usize::try_from(y1 - y0).unwrap_or(0);
    let mut data = vec![0.0; num_rows * num_cols];

    for (i, (&xv, &yv)) in x.iter().zip(y).enumerate() {
        let cx = nearest_cell(xv);
        let cy = nearest_cell(yv);
        if cx < x0 || cx >= x1 || cy < y0 || cy >= y1 {
            continue;
        }
        let col = (cx - x0) as usize;
        let row = (cy - y0) as usize;
        data[row * num_cols + col] += weights.map_or(1.0, |w| w[i]);
    }

    CellGrid {
        x0,
        y0,
        num_rows,
        num_cols,
        data,
    }
}

/// The cell whose center is nearest to `v`: cell `c` covers
/// `[c - 0.5, c + 0.5)`.
fn nearest_cell(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

/// Half-open cell limits covering the rounded position extremes.
/// An empty distribution gets an empty grid.
fn bounding_box(x: &[f64], y: &[f64]) -> (i64, i64, i64, i64) {
    if x.is_empty() {
        return (0, 0, 0, 0);
    }
    let (mut x_min, mut x_max) = (x[0], x[0]);
    for &v in &x[1..] {
        x_min = x_min.min(v);
        x_max = x_max.max(v);
    }
    let (mut y_min, mut y_max) = (y[0], y[0]);
    for &v in &y[1..] {
        y_min = y_min.min(v);
        y_max = y_max.max(v);
    }
    (
        x_min.round() as i64,
        x_max.round() as i64 + 1,
        y_min.round() as i64,
        y_max.round() as i64 + 1,
    )
}
