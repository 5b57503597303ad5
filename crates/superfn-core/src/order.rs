//! Order (recursion depth) precondition.

use thiserror::Error;

/// Largest order representable by the function signature.
pub const MAX_ORDER: u8 = u8::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("order {value} is negative")]
    Negative { value: i64 },
    #[error("order {value} exceeds the maximum of {max}")]
    OutOfRange { value: i64, max: u8 },
}

/// Narrow an order to the representable range, failing on anything outside it.
pub fn checked_order(n: i64) -> Result<u8, OrderError> {
    if n < 0 {
        return Err(OrderError::Negative { value: n });
    }
    u8::try_from(n).map_err(|_| OrderError::OutOfRange {
        value: n,
        max: MAX_ORDER,
    })
}
