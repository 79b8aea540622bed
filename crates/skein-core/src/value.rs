//! Raw value sequences as handed over by a [`Dataset`](crate::Dataset).

/// Element type of a variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// 64-bit floating point (positions, environmental fields, weights).
    Float,
    /// 64-bit signed integer (identifiers, categorical codes, counts).
    Int,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Float => write!(f, "float"),
            Self::Int => write!(f, "int"),
        }
    }
}

/// An owned, untyped value sequence read from a dataset.
///
/// Simulation output carries a handful of element types; everything numeric
/// is widened to `f64`, everything integral (including categorical codes)
/// to `i64`. The distinction matters downstream because densification needs
/// a fill value of the right type (NaN works only for floats).
#[derive(Clone, Debug, PartialEq)]
pub enum Values {
    /// Floating-point data.
    Float(Vec<f64>),
    /// Integer data.
    Int(Vec<i64>),
}

impl Values {
    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            Self::Float(v) => v.len(),
            Self::Int(v) => v.len(),
        }
    }

    /// Whether the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element type of this sequence.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Float(_) => ValueKind::Float,
            Self::Int(_) => ValueKind::Int,
        }
    }

    /// Borrow as a float slice, if this is float data.
    pub fn as_float(&self) -> Option<&[f64]> {
        match self {
            Self::Float(v) => Some(v),
            Self::Int(_) => None,
        }
    }

    /// Borrow as an integer slice, if this is integer data.
    pub fn as_int(&self) -> Option<&[i64]> {
        match self {
            Self::Int(v) => Some(v),
            Self::Float(_) => None,
        }
    }
}

impl From<Vec<f64>> for Values {
    fn from(v: Vec<f64>) -> Self {
        Self::Float(v)
    }
}

impl From<Vec<i64>> for Values {
    fn from(v: Vec<i64>) -> Self {
        Self::Int(v)
    }
}
