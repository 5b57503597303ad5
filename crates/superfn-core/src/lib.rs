//! # superfn-core
//!
//! The canonical binary-recurrence "super function" and the pieces every
//! implementation of it shares:
//! - [`reference`]: the slow, recursively-defined oracle.
//! - [`SuperFn`]: the capability an implementation under test exposes.
//! - [`is_equal_with_tolerance`]: relative comparison used for optimized variants.
//! - [`checked_order`]: precondition check for orders arriving in wider integers.

#![deny(unsafe_code)]

pub mod capability;
pub mod order;
pub mod reference;
pub mod tolerance;

pub use capability::{NamedFn, Reference, SuperFn};
pub use order::{MAX_ORDER, OrderError, checked_order};
pub use reference::{reference, reference_checked};
pub use tolerance::{DEFAULT_TOLERANCE, is_equal_with_tolerance, relative_deviation};
