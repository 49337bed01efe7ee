use std::cmp::Ordering;

/// Compares floating point values treating any NaN as the smallest value.
pub fn compare_floats(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Less)
}
