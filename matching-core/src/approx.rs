//! The single, deliberately isolated floating-point fallback permitted by
//! §9: computing an approximate rational square root when no exact one
//! exists. Every value produced here is re-validated against the crate's
//! rational invariants before being accepted as a candidate rate (see
//! [`crate::roots`]), so an imprecise approximation can only cause a
//! spurious rejection, never a silent invariant violation — this is the
//! "documented rounding policy" §4.D requires of any floating-point use.

use num::{BigInt, BigRational, FromPrimitive, Signed, ToPrimitive};

/// Fixed decimal precision used when converting an `f64` approximation back
/// into an exact rational. `1e15` comfortably exceeds `f64`'s ~15-17
/// significant decimal digits, so no additional precision is lost in the
/// conversion itself.
const SCALE: i64 = 1_000_000_000_000_000;

/// Converts a rational to its nearest `f64`, for use only as an
/// approximation seed (e.g. for `sqrt`), never as the final candidate
/// value.
pub fn to_f64(value: &BigRational) -> Option<f64> {
    value.to_f64()
}

/// Converts an `f64` approximation back into an exact rational at fixed
/// `1e15` precision. Returns `None` for non-finite input.
pub fn from_f64_approx(value: f64) -> Option<BigRational> {
    if !value.is_finite() {
        return None;
    }
    let scaled = (value * SCALE as f64).round();
    let numer = BigInt::from_f64(scaled)?;
    Some(BigRational::new(numer, BigInt::from(SCALE)))
}
