//! Short-Weierstrass curve domain parameters.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;

use crate::modmath;

/// Domain parameters for a short-Weierstrass curve `y² = x³ + a·x + b (mod p)`.
///
/// `a` and `b` are stored already reduced into `[0, p)`; `h`, the cofactor,
/// is metadata only — it is excluded from equality and plays no role in
/// the arithmetic below.
#[derive(Debug, Clone)]
pub struct CurveW {
    p: BigUint,
    a: BigUint,
    b: BigUint,
    h: Option<BigUint>,
}

impl CurveW {
    /// Builds the curve of points satisfying `y² = x³ + a·x + b (mod p)`.
    ///
    /// `a` and `b` may be given as negative integers (e.g. NIST P-256's
    /// `a = -3`); they are reduced into `[0, p)` on construction.
    pub fn new(p: BigUint, a: impl Into<BigInt>, b: impl Into<BigInt>, h: Option<BigUint>) -> Self {
        assert!(p > BigUint::from(3u32), "p must be an odd prime greater than 3");
        let p_big = BigInt::from(p.clone());
        let a = a.into().mod_floor(&p_big).to_biguint().expect("reduced mod positive p");
        let b = b.into().mod_floor(&p_big).to_biguint().expect("reduced mod positive p");
        Self { p, a, b, h }
    }

    /// The field prime `p`.
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// The `a` coefficient, already reduced into `[0, p)`.
    pub fn a(&self) -> &BigUint {
        &self.a
    }

    /// The `b` coefficient, already reduced into `[0, p)`.
    pub fn b(&self) -> &BigUint {
        &self.b
    }

    /// The cofactor, if known. Excluded from equality and arithmetic.
    pub fn cofactor(&self) -> Option<&BigUint> {
        self.h.as_ref()
    }

    /// `y² ≡ x³ + a·x + b (mod p)`.
    pub fn contains_point(&self, x: &BigUint, y: &BigUint) -> bool {
        let lhs = modmath::sqr(y, &self.p);
        let rhs = modmath::add(
            &modmath::mul(&modmath::add(&modmath::sqr(x, &self.p), &self.a, &self.p), x, &self.p),
            &self.b,
            &self.p,
        );
        modmath::sub(&lhs, &rhs, &self.p) == BigUint::from(0u32)
    }
}

impl PartialEq for CurveW {
    /// Cofactor is deliberately excluded: it's domain metadata derived from
    /// the base point, not part of the curve's algebraic identity.
    fn eq(&self, other: &Self) -> bool {
        self.p == other.p && self.a == other.a && self.b == other.b
    }
}

impl Eq for CurveW {}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_curve() -> CurveW {
        // y^2 = x^3 + 2x + 3 over GF(97); (3, 6) is a point on this curve.
        CurveW::new(BigUint::from(97u32), 2, 3, None)
    }

    #[test]
    fn contains_known_point() {
        let c = tiny_curve();
        assert!(c.contains_point(&BigUint::from(3u32), &BigUint::from(6u32)));
    }

    #[test]
    fn rejects_off_curve_point() {
        let c = tiny_curve();
        assert!(!c.contains_point(&BigUint::from(3u32), &BigUint::from(7u32)));
    }

    #[test]
    fn negative_coefficients_are_reduced() {
        let p = BigUint::from(97u32);
        let c1 = CurveW::new(p.clone(), -3, 41, None);
        let c2 = CurveW::new(p.clone(), &p - BigUint::from(3u32), 41, None);
        assert_eq!(c1, c2);
    }

    #[test]
    fn equality_ignores_cofactor() {
        let c1 = CurveW::new(BigUint::from(97u32), 2, 3, Some(BigUint::from(1u32)));
        let c2 = CurveW::new(BigUint::from(97u32), 2, 3, Some(BigUint::from(4u32)));
        assert_eq!(c1, c2);
    }
}
