//! One-line array previews for `Display` output.

use std::fmt::Display;

/// Render a sequence as "first second ... last", or all elements when
/// there are three or fewer.
pub(crate) fn preview<T: Display>(values: &[T]) -> String {
    match values {
        [] => String::new(),
        [a] => format!("{a}"),
        [a, b] => format!("{a} {b}"),
        [a, b, c] => format!("{a} {b} {c}"),
        [a, b, .., z] => format!("{a} {b} ... {z}"),
    }
}
