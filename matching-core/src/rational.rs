//! Exact-rational scalar newtypes used throughout the matching core.
//!
//! `pricegraph`'s `orderbook::scalar` module wraps `f64` in `Price` and
//! `ExchangeRate` newtypes to keep "this is a strictly positive real number"
//! an invariant enforced at construction rather than scattered across call
//! sites. This module follows the same discipline but over
//! [`num::BigRational`], since §9 of the specification forbids floating
//! point for anything but an explicitly isolated, documented fallback (see
//! [`crate::roots::sqrt_ratio`]).

use num::{BigRational, Signed, Zero};

/// A strictly positive exact rational quantity: a sell-amount cap, an
/// executed amount, or a limit price/clearing rate.
///
/// Construction rejects zero and negative values, mirroring
/// `scalar::Price::new`'s rejection of non-positive or non-finite floats.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Positive(BigRational);

impl Positive {
    /// Creates a new positive rational, returning `None` if `value` is not
    /// strictly greater than zero.
    pub fn new(value: BigRational) -> Option<Self> {
        if value.is_positive() {
            Some(Positive(value))
        } else {
            None
        }
    }

    /// The reciprocal `1 / self`. Never panics since `self` is never zero.
    pub fn recip(&self) -> Self {
        Positive(self.0.recip())
    }

    /// Returns the underlying rational value.
    pub fn value(&self) -> &BigRational {
        &self.0
    }

    pub fn into_value(self) -> BigRational {
        self.0
    }
}

/// A non-negative exact rational quantity: an executed fill amount, which is
/// permitted to be exactly zero (an unfilled order).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct NonNegative(BigRational);

impl NonNegative {
    pub fn new(value: BigRational) -> Option<Self> {
        if !value.is_negative() {
            Some(NonNegative(value))
        } else {
            None
        }
    }

    pub fn zero() -> Self {
        NonNegative(BigRational::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn value(&self) -> &BigRational {
        &self.0
    }

    pub fn into_value(self) -> BigRational {
        self.0
    }
}
