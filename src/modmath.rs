//! Small modular-arithmetic helpers shared by the Jacobian and Edwards
//! point implementations.
//!
//! Thin wrappers around `% p` with [`BigUint`], named so the formula code
//! in [`crate::point`] reads the way the EFD (hyperelliptic.org) formulas
//! are written rather than as a wall of `(a * b) % p`.

use num_bigint::BigUint;
use num_traits::Zero;

#[inline]
pub(crate) fn add(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    (a + b) % p
}

#[inline]
pub(crate) fn sub(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    if a >= b {
        (a - b) % p
    } else {
        p - ((b - a) % p)
    }
}

#[inline]
pub(crate) fn mul(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    (a * b) % p
}

#[inline]
pub(crate) fn sqr(a: &BigUint, p: &BigUint) -> BigUint {
    mul(a, a, p)
}

#[inline]
pub(crate) fn neg(a: &BigUint, p: &BigUint) -> BigUint {
    if a.is_zero() { a.clone() } else { p - a }
}

#[inline]
pub(crate) fn double(a: &BigUint, p: &BigUint) -> BigUint {
    add(a, a, p)
}

#[inline]
pub(crate) fn scale_small(a: &BigUint, k: u32, p: &BigUint) -> BigUint {
    mul(a, &BigUint::from(k), p)
}
