//! Classical affine short-Weierstrass points (X9.62 B.3).
//!
//! This is the textbook representation — one modular inversion per
//! addition or doubling — kept around because [`JacobiPoint::to_affine`]
//! (`crate::point::jacobi`) needs somewhere to land, and because the
//! subgroup-order assertion in [`AffinePoint::new`] needs *a* scalar
//! multiplication that doesn't depend on the Jacobian precomputation
//! machinery it's meant to validate inputs for.

use std::sync::Arc;

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Signed, Zero};

use crate::curve::CurveW;
use crate::error::Error;
use crate::modmath;
use crate::numeric::inverse_mod;
use crate::point::codec::{self, Encoding};

/// A point on a short-Weierstrass curve in affine `(x, y)` coordinates.
///
/// `Infinity` is a tagged variant rather than a sentinel curve-less point
/// object — see the crate's design notes for the reasoning.
#[derive(Debug, Clone)]
pub enum AffinePoint {
    Infinity,
    Affine {
        curve: Arc<CurveW>,
        x: BigUint,
        y: BigUint,
        order: Option<BigUint>,
    },
}

impl AffinePoint {
    /// Builds a point from affine coordinates.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is not on `curve`, or if `curve`'s cofactor is
    /// known and greater than 1, `order` is given, and `order·P ≠ ∞` — both
    /// are programmer errors, not recoverable conditions.
    pub fn new(curve: Arc<CurveW>, x: BigUint, y: BigUint, order: Option<BigUint>) -> Self {
        assert!(curve.contains_point(&x, &y), "point is not on the curve");
        let needs_order_check = curve.cofactor().is_some_and(|h| h > &BigUint::one());
        let point = AffinePoint::Affine {
            curve,
            x,
            y,
            order: order.clone(),
        };
        if needs_order_check {
            if let Some(order) = order {
                assert!(
                    point.scalar_mul(&BigInt::from(order)) == AffinePoint::Infinity,
                    "order * P != infinity"
                );
            }
        }
        point
    }

    /// Decodes a point from its byte encoding (see [`crate::point::codec`]).
    pub fn from_bytes(
        curve: Arc<CurveW>,
        data: &[u8],
        validate_encoding: bool,
        valid_encodings: &[Encoding],
        order: Option<BigUint>,
    ) -> Result<Self, Error> {
        let (x, y) = codec::decode(&curve, data, validate_encoding, valid_encodings)?;
        Ok(Self::new(curve, x, y, order))
    }

    /// Encodes the point. Panics on the point at infinity, which has no
    /// affine coordinates to encode.
    pub fn to_bytes(&self, encoding: Encoding) -> Vec<u8> {
        match self {
            AffinePoint::Infinity => panic!("cannot encode the point at infinity"),
            AffinePoint::Affine { curve, x, y, .. } => codec::encode(curve.p(), x, y, encoding),
        }
    }

    pub fn x(&self) -> &BigUint {
        match self {
            AffinePoint::Infinity => panic!("point at infinity has no affine x"),
            AffinePoint::Affine { x, .. } => x,
        }
    }

    pub fn y(&self) -> &BigUint {
        match self {
            AffinePoint::Infinity => panic!("point at infinity has no affine y"),
            AffinePoint::Affine { y, .. } => y,
        }
    }

    pub fn curve(&self) -> Option<&Arc<CurveW>> {
        match self {
            AffinePoint::Infinity => None,
            AffinePoint::Affine { curve, .. } => Some(curve),
        }
    }

    pub fn order(&self) -> Option<&BigUint> {
        match self {
            AffinePoint::Infinity => None,
            AffinePoint::Affine { order, .. } => order.as_ref(),
        }
    }

    /// Returns a new point added to itself.
    pub fn double(&self) -> AffinePoint {
        match self {
            AffinePoint::Infinity => AffinePoint::Infinity,
            AffinePoint::Affine { curve, x, y, order } => {
                let p = curve.p();
                let a = curve.a();
                let l = modmath::mul(
                    &modmath::add(&modmath::scale_small(&modmath::sqr(x, p), 3, p), a, p),
                    &inverse_mod(&modmath::double(y, p), p),
                    p,
                );
                let x3 = modmath::sub(&modmath::sqr(&l, p), &modmath::double(x, p), p);
                let y3 = modmath::sub(&modmath::mul(&l, &modmath::sub(x, &x3, p), p), y, p);
                AffinePoint::new(curve.clone(), x3, y3, order.clone())
            }
        }
    }

    /// `self · k` for any integer `k`, including negative ones (`k·P =
    /// (−k)·(−P)`). Uses the ternary-expansion algorithm of X9.62 D.3.2.
    pub fn scalar_mul(&self, k: &BigInt) -> AffinePoint {
        if k.is_negative() {
            return (-self).scalar_mul(&-k);
        }
        let (curve, x, y, order) = match self {
            AffinePoint::Infinity => return AffinePoint::Infinity,
            AffinePoint::Affine { curve, x, y, order } => (curve, x, y, order),
        };
        if k.is_zero() || order.as_ref().is_some_and(|o| (k % BigInt::from(o.clone())).is_zero()) {
            return AffinePoint::Infinity;
        }
        if k.is_one() {
            return self.clone();
        }

        let e = k.to_biguint().expect("non-negative BigInt converts to BigUint");
        let e3 = &e * BigUint::from(3u32);
        let neg_self = AffinePoint::new(curve.clone(), x.clone(), modmath::neg(y, curve.p()), order.clone());

        let mut i = leftmost_bit(&e3) / 2u32;
        let mut result = self.clone();
        let one = BigUint::one();
        while i > one {
            result = result.double();
            let e3_bit = (&e3 >> bit_index(&i)) & BigUint::one();
            let e_bit = (&e >> bit_index(&i)) & BigUint::one();
            if e3_bit.is_one() && e_bit.is_zero() {
                result = (&result + self).expect("same curve by construction");
            } else if e3_bit.is_zero() && e_bit.is_one() {
                result = (&result + &neg_self).expect("same curve by construction");
            }
            i /= BigUint::from(2u32);
        }
        result
    }

    pub fn checked_add(&self, other: &AffinePoint) -> Result<AffinePoint, Error> {
        match (self, other) {
            (AffinePoint::Infinity, _) => Ok(other.clone()),
            (_, AffinePoint::Infinity) => Ok(self.clone()),
            (
                AffinePoint::Affine { curve: c1, x: x1, y: y1, .. },
                AffinePoint::Affine { curve: c2, x: x2, y: y2, .. },
            ) => {
                if c1 != c2 {
                    return Err(Error::CurveMismatch);
                }
                if x1 == x2 {
                    let p = c1.p();
                    return Ok(if modmath::add(y1, y2, p).is_zero() {
                        AffinePoint::Infinity
                    } else {
                        self.double()
                    });
                }
                let p = c1.p();
                let l = modmath::mul(&modmath::sub(y2, y1, p), &inverse_mod(&modmath::sub(x2, x1, p), p), p);
                let x3 = modmath::sub(&modmath::sub(&modmath::sqr(&l, p), x1, p), x2, p);
                let y3 = modmath::sub(&modmath::mul(&l, &modmath::sub(x1, &x3, p), p), y1, p);
                Ok(AffinePoint::new(c1.clone(), x3, y3, None))
            }
        }
    }
}

fn leftmost_bit(x: &BigUint) -> BigUint {
    assert!(!x.is_zero());
    let mut result = BigUint::one();
    while &result <= x {
        result *= BigUint::from(2u32);
    }
    result / BigUint::from(2u32)
}

fn bit_index(power_of_two: &BigUint) -> u64 {
    power_of_two.bits() - 1
}

impl std::ops::Add<&AffinePoint> for &AffinePoint {
    type Output = Result<AffinePoint, Error>;
    fn add(self, other: &AffinePoint) -> Result<AffinePoint, Error> {
        self.checked_add(other)
    }
}

impl std::ops::Neg for &AffinePoint {
    type Output = AffinePoint;
    fn neg(self) -> AffinePoint {
        match self {
            AffinePoint::Infinity => AffinePoint::Infinity,
            AffinePoint::Affine { curve, x, y, order } => {
                AffinePoint::new(curve.clone(), x.clone(), modmath::neg(y, curve.p()), order.clone())
            }
        }
    }
}

impl PartialEq for AffinePoint {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AffinePoint::Infinity, AffinePoint::Infinity) => true,
            (AffinePoint::Infinity, AffinePoint::Affine { .. })
            | (AffinePoint::Affine { .. }, AffinePoint::Infinity) => false,
            (
                AffinePoint::Affine { curve: c1, x: x1, y: y1, .. },
                AffinePoint::Affine { curve: c2, x: x2, y: y2, .. },
            ) => c1 == c2 && x1 == x2 && y1 == y2,
        }
    }
}

impl Eq for AffinePoint {}

#[cfg(test)]
mod tests {
    use super::*;

    // y^2 = x^3 + 2x + 3 over GF(97); (3, 6) has order 5.
    fn tiny_curve() -> Arc<CurveW> {
        Arc::new(CurveW::new(BigUint::from(97u32), 2, 3, None))
    }

    fn base_point(curve: Arc<CurveW>) -> AffinePoint {
        AffinePoint::new(curve, BigUint::from(3u32), BigUint::from(6u32), Some(BigUint::from(5u32)))
    }

    #[test]
    fn double_stays_on_curve() {
        let curve = tiny_curve();
        let g = base_point(curve.clone());
        let d = g.double();
        assert!(curve.contains_point(d.x(), d.y()));
    }

    #[test]
    fn addition_matches_doubling() {
        let curve = tiny_curve();
        let g = base_point(curve);
        assert_eq!((&g + &g).unwrap(), g.double());
    }

    #[test]
    fn order_times_point_is_infinity() {
        let curve = tiny_curve();
        let g = base_point(curve);
        assert_eq!(g.scalar_mul(&BigInt::from(5)), AffinePoint::Infinity);
    }

    #[test]
    fn inverse_cancels_under_addition() {
        let curve = tiny_curve();
        let g = base_point(curve);
        assert_eq!((&g + &(-&g)).unwrap(), AffinePoint::Infinity);
    }

    #[test]
    fn negative_scalar_matches_negated_point() {
        let curve = tiny_curve();
        let g = base_point(curve);
        assert_eq!(g.scalar_mul(&BigInt::from(-3)), (-&g).scalar_mul(&BigInt::from(3)));
    }

    #[test]
    fn scalar_law_distributes_over_addition() {
        let curve = tiny_curve();
        let g = base_point(curve);
        let lhs = g.scalar_mul(&BigInt::from(4));
        let rhs = (&g.scalar_mul(&BigInt::from(2)) + &g.scalar_mul(&BigInt::from(2))).unwrap();
        assert_eq!(lhs, rhs);
    }
}
