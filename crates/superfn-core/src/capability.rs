//! The Function-Under-Test capability.
//!
//! The harness is agnostic to how an implementation evaluates the
//! recurrence (recursion, table, closed form); it only sees [`SuperFn`].

use crate::reference::reference;

/// Anything that evaluates `f(x1, x2, n)`.
pub trait SuperFn {
    /// Display name used in reports and logs.
    fn name(&self) -> &str;

    /// Evaluate the function.
    fn eval(&self, x1: f64, x2: f64, n: u8) -> f64;

    /// True only for the canonical recursive reference.
    ///
    /// The conformance suite skips its differential check for the reference,
    /// since comparing it against itself proves nothing.
    fn is_reference(&self) -> bool {
        false
    }
}

/// The canonical recursive implementation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Reference;

impl SuperFn for Reference {
    fn name(&self) -> &str {
        "reference"
    }

    #[inline]
    fn eval(&self, x1: f64, x2: f64, n: u8) -> f64 {
        reference(x1, x2, n)
    }

    fn is_reference(&self) -> bool {
        true
    }
}

/// A closure or function pointer with a display name.
///
/// ```
/// use superfn_core::{NamedFn, SuperFn};
///
/// let first_only = NamedFn::new("first-only", |x1: f64, _x2: f64, _n: u8| x1);
/// assert_eq!(first_only.name(), "first-only");
/// assert!(!first_only.is_reference());
/// ```
#[derive(Clone)]
pub struct NamedFn<F> {
    name: String,
    f: F,
}

impl<F> NamedFn<F>
where
    F: Fn(f64, f64, u8) -> f64,
{
    #[must_use]
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> std::fmt::Debug for NamedFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamedFn").field("name", &self.name).finish()
    }
}

impl<F> SuperFn for NamedFn<F>
where
    F: Fn(f64, f64, u8) -> f64,
{
    fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    fn eval(&self, x1: f64, x2: f64, n: u8) -> f64 {
        (self.f)(x1, x2, n)
    }
}

impl<T: SuperFn + ?Sized> SuperFn for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn eval(&self, x1: f64, x2: f64, n: u8) -> f64 {
        (**self).eval(x1, x2, n)
    }

    fn is_reference(&self) -> bool {
        (**self).is_reference()
    }
}

impl<T: SuperFn + ?Sized> SuperFn for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn eval(&self, x1: f64, x2: f64, n: u8) -> f64 {
        (**self).eval(x1, x2, n)
    }

    fn is_reference(&self) -> bool {
        (**self).is_reference()
    }
}
