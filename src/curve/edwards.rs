//! Twisted-Edwards curve domain parameters.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;

use crate::modmath;

/// Domain parameters for a twisted-Edwards curve
/// `a·x² + y² = 1 + d·x²·y² (mod p)`.
///
/// `a` and `d` are stored already reduced into `[0, p)`; `h` is cofactor
/// metadata, excluded from equality as for [`crate::curve::CurveW`].
#[derive(Debug, Clone)]
pub struct CurveE {
    p: BigUint,
    a: BigUint,
    d: BigUint,
    h: Option<BigUint>,
}

impl CurveE {
    /// Builds the curve of points satisfying
    /// `a·x² + y² = 1 + d·x²·y² (mod p)`.
    pub fn new(p: BigUint, a: impl Into<BigInt>, d: impl Into<BigInt>, h: Option<BigUint>) -> Self {
        assert!(p > BigUint::from(3u32), "p must be an odd prime greater than 3");
        let p_big = BigInt::from(p.clone());
        let a = a.into().mod_floor(&p_big).to_biguint().expect("reduced mod positive p");
        let d = d.into().mod_floor(&p_big).to_biguint().expect("reduced mod positive p");
        Self { p, a, d, h }
    }

    /// The field prime `p`.
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// The `a` coefficient, already reduced into `[0, p)`.
    pub fn a(&self) -> &BigUint {
        &self.a
    }

    /// The `d` coefficient, already reduced into `[0, p)`.
    pub fn d(&self) -> &BigUint {
        &self.d
    }

    /// The cofactor, if known. Excluded from equality and arithmetic.
    pub fn cofactor(&self) -> Option<&BigUint> {
        self.h.as_ref()
    }

    /// `a·x² + y² ≡ 1 + d·x²·y² (mod p)`.
    pub fn contains_point(&self, x: &BigUint, y: &BigUint) -> bool {
        let xx = modmath::sqr(x, &self.p);
        let yy = modmath::sqr(y, &self.p);
        let lhs = modmath::add(&modmath::mul(&self.a, &xx, &self.p), &yy, &self.p);
        let rhs = modmath::add(
            &BigUint::from(1u32),
            &modmath::mul(&self.d, &modmath::mul(&xx, &yy, &self.p), &self.p),
            &self.p,
        );
        modmath::sub(&lhs, &rhs, &self.p) == BigUint::from(0u32)
    }
}

impl PartialEq for CurveE {
    fn eq(&self, other: &Self) -> bool {
        self.p == other.p && self.a == other.a && self.d == other.d
    }
}

impl Eq for CurveE {}
