//! Reference recurrence.
//!
//! ```text
//! f(x1, x2, 0) = x1
//! f(x1, x2, 1) = x1 * x2
//! f(x1, x2, n) = f(x1, x2, n - 2) * f(x1, x2, n - 1)
//! ```
//!
//! Evaluated naively: the call tree grows like the Fibonacci numbers, so
//! order 30 already costs a few million calls. That is the point of having
//! faster implementations validated against it.

use crate::order::{OrderError, checked_order};

/// Evaluate the recurrence exactly as defined, without memoization.
#[must_use]
pub fn reference(x1: f64, x2: f64, n: u8) -> f64 {
    match n {
        0 => x1,
        1 => x1 * x2,
        _ => reference(x1, x2, n - 2) * reference(x1, x2, n - 1),
    }
}

/// Evaluate the recurrence for an order that has not been narrowed yet.
///
/// Negative and oversized orders are rejected instead of being wrapped into
/// range, so a bad order can never yield a plausible-looking number.
pub fn reference_checked(x1: f64, x2: f64, n: i64) -> Result<f64, OrderError> {
    let n = checked_order(n)?;
    Ok(reference(x1, x2, n))
}
