//! Relative-tolerance comparison of floating-point results.
//!
//! Optimized implementations may multiply in a different order than the
//! recursive reference, so past the base cases results are only comparable
//! within a relative bound.

/// Default maximum relative deviation: 0.1%.
pub const DEFAULT_TOLERANCE: f64 = 0.001;

/// True iff `|reference - actual| <= |reference| * tolerance`.
///
/// A zero reference admits no deviation at all. Any NaN or infinite
/// operand makes the comparison false.
#[inline]
#[must_use]
pub fn is_equal_with_tolerance(reference: f64, actual: f64, tolerance: f64) -> bool {
    (reference - actual).abs() <= reference.abs() * tolerance
}

/// `|reference - actual| / |reference|`, for reporting.
///
/// Zero when both values are identical (including both zero), infinite when
/// the reference is zero and the actual value is not.
#[must_use]
pub fn relative_deviation(reference: f64, actual: f64) -> f64 {
    if reference == actual {
        return 0.0;
    }
    let delta = (reference - actual).abs();
    if reference == 0.0 {
        return f64::INFINITY;
    }
    delta / reference.abs()
}
