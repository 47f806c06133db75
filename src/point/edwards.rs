//! Twisted-Edwards points in extended coordinates.
//!
//! `x = X/Z`, `y = Y/Z`, `x·y = T/Z`. Formulas are "add-2008-hwcd-2" and
//! "dbl-2008-hwcd" from the explicit-formulas database
//! (hyperelliptic.org/EFD, twisted Edwards extended); unlike the Jacobian
//! formulas in [`crate::point::jacobi`] there's a single addition and a
//! single doubling formula, each already handling its own degenerate case.

use std::sync::Arc;

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Signed, Zero};

use crate::curve::CurveE;
use crate::error::Error;
use crate::modmath;
use crate::numeric::inverse_mod;
use crate::point::codec::{self, Encoding};
use crate::point::jacobi::naf;

type Quad = (BigUint, BigUint, BigUint, BigUint);

/// A point on a twisted-Edwards curve, held in extended coordinates.
///
/// As with [`crate::point::JacobiPoint`], the point at infinity (the
/// group identity, `(0, 1, 1, 0)` in extended coordinates) is folded into
/// a dedicated `Infinity` variant at construction time rather than kept
/// as a live `Edwards` value with `X = 0`.
#[derive(Debug, Clone)]
pub enum EdwardsPoint {
    Infinity,
    Edwards {
        curve: Arc<CurveE>,
        x: BigUint,
        y: BigUint,
        z: BigUint,
        t: BigUint,
        order: Option<BigUint>,
    },
}

impl EdwardsPoint {
    fn from_raw(curve: Arc<CurveE>, x: BigUint, y: BigUint, z: BigUint, t: BigUint, order: Option<BigUint>) -> Self {
        if x.is_zero() || t.is_zero() {
            EdwardsPoint::Infinity
        } else {
            EdwardsPoint::Edwards { curve, x, y, z, t, order }
        }
    }

    /// Builds a point from affine coordinates (`Z = 1`, `T = x·y`),
    /// asserting it lies on `curve`.
    pub fn from_affine(curve: Arc<CurveE>, x: BigUint, y: BigUint, order: Option<BigUint>) -> Self {
        assert!(curve.contains_point(&x, &y), "point is not on the curve");
        let p = curve.p();
        let t = modmath::mul(&x, &y, p);
        Self::from_raw(curve, x, y, BigUint::one(), t, order)
    }

    /// Encodes the point's affine form as `raw`, `uncompressed`, or
    /// `hybrid` — [`codec::encode`] only needs the field prime, so it's
    /// shared with [`crate::point::JacobiPoint::to_bytes`] directly.
    ///
    /// `Encoding::Compressed` is rejected: encoding `(x, y)` as `{0x02/0x03}
    /// ‖ x` is itself curve-agnostic, but `Encoding::Compressed` is only
    /// useful paired with a *decoder* that can recompute `y` from `x`, and
    /// [`codec::decode`] hard-codes the short-Weierstrass curve equation
    /// (`curve.a()`/`curve.b()`, which `CurveE` has no equivalent of) to do
    /// that recovery — so this crate never round-trips a compressed
    /// Edwards point and doesn't offer to produce one.
    ///
    /// # Panics
    ///
    /// Panics on the point at infinity, which has no affine coordinates to
    /// encode, and on `Encoding::Compressed`.
    pub fn to_bytes(&self, encoding: Encoding) -> Vec<u8> {
        assert!(encoding != Encoding::Compressed, "compressed encoding has no matching decoder for Edwards points");
        match self.scale() {
            EdwardsPoint::Infinity => panic!("cannot encode the point at infinity"),
            EdwardsPoint::Edwards { curve, x, y, .. } => codec::encode(curve.p(), &x, &y, encoding),
        }
    }

    /// Affine `x = X/Z`.
    pub fn x(&self) -> BigUint {
        match self {
            EdwardsPoint::Infinity => BigUint::zero(),
            EdwardsPoint::Edwards { curve, x, z, .. } => {
                if z.is_one() {
                    x.clone()
                } else {
                    modmath::mul(x, &inverse_mod(z, curve.p()), curve.p())
                }
            }
        }
    }

    /// Affine `y = Y/Z`.
    pub fn y(&self) -> BigUint {
        match self {
            EdwardsPoint::Infinity => BigUint::one(),
            EdwardsPoint::Edwards { curve, y, z, .. } => {
                if z.is_one() {
                    y.clone()
                } else {
                    modmath::mul(y, &inverse_mod(z, curve.p()), curve.p())
                }
            }
        }
    }

    pub fn curve(&self) -> Option<&Arc<CurveE>> {
        match self {
            EdwardsPoint::Infinity => None,
            EdwardsPoint::Edwards { curve, .. } => Some(curve),
        }
    }

    pub fn order(&self) -> Option<&BigUint> {
        match self {
            EdwardsPoint::Infinity => None,
            EdwardsPoint::Edwards { order, .. } => order.as_ref(),
        }
    }

    /// Returns an equivalent point with `Z = 1`.
    pub fn scale(&self) -> EdwardsPoint {
        match self {
            EdwardsPoint::Infinity => EdwardsPoint::Infinity,
            EdwardsPoint::Edwards { curve, x, y, z, order, .. } => {
                if z.is_one() {
                    self.clone()
                } else {
                    let p = curve.p();
                    let z_inv = inverse_mod(z, p);
                    let nx = modmath::mul(x, &z_inv, p);
                    let ny = modmath::mul(y, &z_inv, p);
                    let nt = modmath::mul(&nx, &ny, p);
                    EdwardsPoint::Edwards {
                        curve: curve.clone(),
                        x: nx,
                        y: ny,
                        z: BigUint::one(),
                        t: nt,
                        order: order.clone(),
                    }
                }
            }
        }
    }

    pub fn double(&self) -> EdwardsPoint {
        match self {
            EdwardsPoint::Infinity => EdwardsPoint::Infinity,
            EdwardsPoint::Edwards { curve, x, y, z, order, .. } => {
                let p = curve.p();
                let a = curve.a();
                let (x3, y3, z3, t3) = double_raw(x, y, z, p, a);
                EdwardsPoint::from_raw(curve.clone(), x3, y3, z3, t3, order.clone())
            }
        }
    }

    pub fn checked_add(&self, other: &EdwardsPoint) -> Result<EdwardsPoint, Error> {
        match (self, other) {
            (EdwardsPoint::Infinity, _) => Ok(other.clone()),
            (_, EdwardsPoint::Infinity) => Ok(self.clone()),
            (
                EdwardsPoint::Edwards { curve: c1, .. },
                EdwardsPoint::Edwards { curve: c2, .. },
            ) => {
                if c1 != c2 {
                    return Err(Error::CurveMismatch);
                }
                Ok(self.add_same_curve(other))
            }
        }
    }

    fn add_same_curve(&self, other: &EdwardsPoint) -> EdwardsPoint {
        let (curve, x1, y1, z1, t1, order) = match self {
            EdwardsPoint::Infinity => return other.clone(),
            EdwardsPoint::Edwards { curve, x, y, z, t, order } => (curve, x, y, z, t, order),
        };
        let (x2, y2, z2, t2) = match other {
            EdwardsPoint::Infinity => return self.clone(),
            EdwardsPoint::Edwards { x, y, z, t, .. } => (x, y, z, t),
        };
        let p = curve.p();
        let a = curve.a();
        let (x3, y3, z3, t3) = add_raw(x1, y1, z1, t1, x2, y2, z2, t2, p, a);
        EdwardsPoint::from_raw(curve.clone(), x3, y3, z3, t3, order.clone())
    }

    /// `k·P` for any integer `k`, including negative ones.
    pub fn scalar_mul(&self, k: &BigInt) -> EdwardsPoint {
        if k.is_negative() {
            return (-self).scalar_mul(&-k);
        }
        let (curve, x, y, z, t, order) = match self {
            EdwardsPoint::Infinity => return EdwardsPoint::Infinity,
            EdwardsPoint::Edwards { curve, x, y, z, t, order } => (curve, x, y, z, t, order),
        };
        if x.is_zero() || k.is_zero() {
            return EdwardsPoint::Infinity;
        }
        if k.is_one() {
            return self.clone();
        }

        let k = k.to_biguint().expect("non-negative BigInt converts to BigUint");
        let k = match order {
            Some(ord) => k % (ord * BigUint::from(2u32)),
            None => k,
        };

        let p = curve.p();
        let a = curve.a();
        let neg_x = modmath::neg(x, p);
        let neg_t = modmath::neg(t, p);

        let mut acc: Quad = (BigUint::zero(), BigUint::one(), BigUint::one(), BigUint::zero());
        for d in naf(&k).into_iter().rev() {
            acc = double_raw(&acc.0, &acc.1, &acc.2, p, a);
            if d < 0 {
                acc = add_raw(&acc.0, &acc.1, &acc.2, &acc.3, &neg_x, y, z, &neg_t, p, a);
            } else if d > 0 {
                acc = add_raw(&acc.0, &acc.1, &acc.2, &acc.3, x, y, z, t, p, a);
            }
        }
        EdwardsPoint::from_raw(curve.clone(), acc.0, acc.1, acc.2, acc.3, order.clone())
    }
}

impl std::ops::Add<&EdwardsPoint> for &EdwardsPoint {
    type Output = Result<EdwardsPoint, Error>;
    fn add(self, other: &EdwardsPoint) -> Result<EdwardsPoint, Error> {
        self.checked_add(other)
    }
}

impl std::ops::Neg for &EdwardsPoint {
    type Output = EdwardsPoint;
    fn neg(self) -> EdwardsPoint {
        match self {
            EdwardsPoint::Infinity => EdwardsPoint::Infinity,
            EdwardsPoint::Edwards { curve, x, y, z, t, order } => {
                let p = curve.p();
                EdwardsPoint::Edwards {
                    curve: curve.clone(),
                    x: modmath::neg(x, p),
                    y: y.clone(),
                    z: z.clone(),
                    t: modmath::neg(t, p),
                    order: order.clone(),
                }
            }
        }
    }
}

impl PartialEq for EdwardsPoint {
    /// Cross-multiplies by `Z` to eliminate divisions.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (EdwardsPoint::Infinity, EdwardsPoint::Infinity) => true,
            (EdwardsPoint::Infinity, EdwardsPoint::Edwards { .. })
            | (EdwardsPoint::Edwards { .. }, EdwardsPoint::Infinity) => false,
            (
                EdwardsPoint::Edwards { curve: c1, x: x1, y: y1, z: z1, .. },
                EdwardsPoint::Edwards { curve: c2, x: x2, y: y2, z: z2, .. },
            ) => {
                if c1 != c2 {
                    return false;
                }
                let p = c1.p();
                modmath::sub(&modmath::mul(x1, z2, p), &modmath::mul(x2, z1, p), p).is_zero()
                    && modmath::sub(&modmath::mul(y1, z2, p), &modmath::mul(y2, z1, p), p).is_zero()
            }
        }
    }
}

impl Eq for EdwardsPoint {}

fn add_raw(
    x1: &BigUint,
    y1: &BigUint,
    z1: &BigUint,
    t1: &BigUint,
    x2: &BigUint,
    y2: &BigUint,
    z2: &BigUint,
    t2: &BigUint,
    p: &BigUint,
    a: &BigUint,
) -> Quad {
    let aa = modmath::mul(x1, x2, p);
    let bb = modmath::mul(y1, y2, p);
    let cc = modmath::mul(z1, t2, p);
    let dd = modmath::mul(t1, z2, p);
    let e = modmath::add(&dd, &cc, p);
    let f = modmath::add(
        &modmath::sub(&modmath::mul(&modmath::sub(x1, y1, p), &modmath::add(x2, y2, p), p), &aa, p),
        &bb,
        p,
    );
    let g = modmath::add(&bb, &modmath::mul(a, &aa, p), p);
    let h = modmath::sub(&dd, &cc, p);
    if h.is_zero() {
        return double_raw(x1, y1, z1, p, a);
    }
    let x3 = modmath::mul(&e, &f, p);
    let y3 = modmath::mul(&g, &h, p);
    let t3 = modmath::mul(&e, &h, p);
    let z3 = modmath::mul(&f, &g, p);
    (x3, y3, z3, t3)
}

fn double_raw(x1: &BigUint, y1: &BigUint, z1: &BigUint, p: &BigUint, a: &BigUint) -> Quad {
    let aa = modmath::sqr(x1, p);
    let bb = modmath::sqr(y1, p);
    let cc = modmath::double(&modmath::sqr(z1, p), p);
    let dd = modmath::mul(a, &aa, p);
    let e = modmath::sub(&modmath::sub(&modmath::sqr(&modmath::add(x1, y1, p), p), &aa, p), &bb, p);
    let g = modmath::add(&dd, &bb, p);
    let f = modmath::sub(&g, &cc, p);
    let h = modmath::sub(&dd, &bb, p);
    let x3 = modmath::mul(&e, &f, p);
    let y3 = modmath::mul(&g, &h, p);
    let t3 = modmath::mul(&e, &h, p);
    let z3 = modmath::mul(&f, &g, p);
    (x3, y3, z3, t3)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -x^2 + y^2 = 1 + 3*x^2*y^2 over GF(101); (0, 1) is the identity,
    // (16, 27) verified on-curve by hand for a non-trivial case.
    fn tiny_curve() -> Arc<CurveE> {
        Arc::new(CurveE::new(BigUint::from(101u32), -1, 3, None))
    }

    fn find_point(curve: &CurveE) -> (BigUint, BigUint) {
        for x in 0u32..101 {
            for y in 0u32..101 {
                let xb = BigUint::from(x);
                let yb = BigUint::from(y);
                if curve.contains_point(&xb, &yb) && !(x == 0 && y == 1) {
                    return (xb, yb);
                }
            }
        }
        panic!("no non-identity point found");
    }

    #[test]
    fn double_stays_on_curve() {
        let curve = tiny_curve();
        let (x, y) = find_point(&curve);
        let g = EdwardsPoint::from_affine(curve.clone(), x, y, None);
        let d = g.double();
        assert!(curve.contains_point(&d.x(), &d.y()));
    }

    #[test]
    fn addition_matches_doubling() {
        let curve = tiny_curve();
        let (x, y) = find_point(&curve);
        let g = EdwardsPoint::from_affine(curve, x, y, None);
        assert_eq!((&g + &g).unwrap(), g.double());
    }

    #[test]
    fn identity_is_additive_identity() {
        let curve = tiny_curve();
        let (x, y) = find_point(&curve);
        let g = EdwardsPoint::from_affine(curve.clone(), x, y, None);
        let id = EdwardsPoint::from_affine(curve, BigUint::zero(), BigUint::one(), None);
        assert_eq!((&g + &id).unwrap(), g);
    }

    #[test]
    fn scalar_two_matches_doubling() {
        let curve = tiny_curve();
        let (x, y) = find_point(&curve);
        let g = EdwardsPoint::from_affine(curve, x, y, None);
        assert_eq!(g.scalar_mul(&BigInt::from(2)), g.double());
    }

    #[test]
    fn negative_scalar_matches_negated_point() {
        let curve = tiny_curve();
        let (x, y) = find_point(&curve);
        let g = EdwardsPoint::from_affine(curve, x, y, None);
        assert_eq!(g.scalar_mul(&BigInt::from(-3)), (-&g).scalar_mul(&BigInt::from(3)));
    }

    #[test]
    fn raw_uncompressed_and_hybrid_encode_to_expected_lengths() {
        let curve = tiny_curve();
        let (x, y) = find_point(&curve);
        let g = EdwardsPoint::from_affine(curve.clone(), x.clone(), y.clone(), None);

        let l = crate::numeric::orderlen(curve.p());
        assert_eq!(g.to_bytes(Encoding::Raw).len(), 2 * l);
        assert_eq!(g.to_bytes(Encoding::Uncompressed).len(), 2 * l + 1);
        assert_eq!(g.to_bytes(Encoding::Hybrid).len(), 2 * l + 1);

        assert_eq!(g.to_bytes(Encoding::Uncompressed)[0], 0x04);
        let y_is_odd = &y % BigUint::from(2u32) == BigUint::one();
        assert_eq!(g.to_bytes(Encoding::Hybrid)[0], if y_is_odd { 0x07 } else { 0x06 });
    }

    #[test]
    fn raw_encoding_round_trips_through_affine_coordinates() {
        let curve = tiny_curve();
        let (x, y) = find_point(&curve);
        let g = EdwardsPoint::from_affine(curve.clone(), x.clone(), y.clone(), None);

        let bytes = g.to_bytes(Encoding::Raw);
        let l = crate::numeric::orderlen(curve.p());
        let (xb, yb) = bytes.split_at(l);
        assert_eq!(crate::numeric::string_to_number(xb), x);
        assert_eq!(crate::numeric::string_to_number(yb), y);
    }

    #[test]
    #[should_panic(expected = "compressed encoding has no matching decoder")]
    fn compressed_encoding_is_rejected() {
        let curve = tiny_curve();
        let (x, y) = find_point(&curve);
        let g = EdwardsPoint::from_affine(curve, x, y, None);
        let _ = g.to_bytes(Encoding::Compressed);
    }

    #[test]
    #[should_panic(expected = "cannot encode the point at infinity")]
    fn infinity_cannot_be_encoded() {
        EdwardsPoint::Infinity.to_bytes(Encoding::Raw);
    }

    #[test]
    fn checked_add_rejects_curve_mismatch() {
        let curve1 = tiny_curve();
        let curve2 = Arc::new(CurveE::new(BigUint::from(101u32), 2, 3, None));
        let (x1, y1) = find_point(&curve1);
        let (x2, y2) = find_point(&curve2);
        let p = EdwardsPoint::from_affine(curve1, x1, y1, None);
        let q = EdwardsPoint::from_affine(curve2, x2, y2, None);
        assert_eq!((&p + &q).unwrap_err(), Error::CurveMismatch);
    }
}
