//! Short-Weierstrass points in Jacobian coordinates.
//!
//! `x = X/Z²`, `y = Y/Z³`. All formulas are from the explicit-formulas
//! database (hyperelliptic.org/EFD, short-Weierstrass Jacobian); the case
//! selection between them is preserved deliberately — each case saves
//! multiplications over the fully general one.

use std::sync::{Arc, OnceLock};

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::curve::CurveW;
use crate::error::Error;
use crate::modmath;
use crate::numeric::inverse_mod;
use crate::point::codec::{self, Encoding};
use crate::point::AffinePoint;

type Triple = (BigUint, BigUint, BigUint);

/// A point on a short-Weierstrass curve, held in Jacobian coordinates.
///
/// `Infinity` is a dedicated variant rather than a sentinel curve/coordinate
/// triple — every arithmetic result that would collapse to the identity
/// (`Y = 0` or `Z = 0`) is folded into this variant at construction time, so
/// no other code in this module ever has to special-case a live `Jacobi`
/// value with zero `Y` or `Z`.
#[derive(Debug, Clone)]
pub enum JacobiPoint {
    Infinity,
    Jacobi {
        curve: Arc<CurveW>,
        x: BigUint,
        y: BigUint,
        z: BigUint,
        order: Option<BigUint>,
        generator: bool,
        /// Lazily built table of `(x, y)` for `2^(2j)·P`, published once via
        /// [`OnceLock::get_or_init`] — the "single atomic handle write" the
        /// concurrency model calls for. Only ever populated when
        /// `generator` is set.
        precompute: Arc<OnceLock<Vec<(BigUint, BigUint)>>>,
    },
}

impl JacobiPoint {
    fn from_raw(
        curve: Arc<CurveW>,
        x: BigUint,
        y: BigUint,
        z: BigUint,
        order: Option<BigUint>,
        generator: bool,
    ) -> Self {
        if y.is_zero() || z.is_zero() {
            JacobiPoint::Infinity
        } else {
            JacobiPoint::Jacobi {
                curve,
                x,
                y,
                z,
                order,
                generator,
                precompute: Arc::new(OnceLock::new()),
            }
        }
    }

    /// Builds a point from affine coordinates (`Z = 1`), asserting it lies
    /// on `curve`.
    pub fn from_affine(
        curve: Arc<CurveW>,
        x: BigUint,
        y: BigUint,
        order: Option<BigUint>,
        generator: bool,
    ) -> Self {
        assert!(curve.contains_point(&x, &y), "point is not on the curve");
        Self::from_raw(curve, x, y, BigUint::one(), order, generator)
    }

    /// Decodes a point from its byte encoding (see [`crate::point::codec`]).
    pub fn from_bytes(
        curve: Arc<CurveW>,
        data: &[u8],
        validate_encoding: bool,
        valid_encodings: &[Encoding],
        order: Option<BigUint>,
        generator: bool,
    ) -> Result<Self, Error> {
        let (x, y) = codec::decode(&curve, data, validate_encoding, valid_encodings)?;
        Ok(Self::from_affine(curve, x, y, order, generator))
    }

    /// Encodes the point's affine form. Panics on the point at infinity,
    /// which has no affine coordinates to encode.
    pub fn to_bytes(&self, encoding: Encoding) -> Vec<u8> {
        match self.scale() {
            JacobiPoint::Infinity => panic!("cannot encode the point at infinity"),
            JacobiPoint::Jacobi { curve, x, y, .. } => codec::encode(curve.p(), &x, &y, encoding),
        }
    }

    /// Affine `x = X/Z²`. Prefer [`Self::to_affine`] when both coordinates
    /// are needed, to avoid inverting `Z` twice.
    pub fn x(&self) -> BigUint {
        match self {
            JacobiPoint::Infinity => panic!("point at infinity has no affine x"),
            JacobiPoint::Jacobi { curve, x, z, .. } => {
                if z.is_one() {
                    x.clone()
                } else {
                    let p = curve.p();
                    let z_inv = inverse_mod(z, p);
                    modmath::mul(x, &modmath::sqr(&z_inv, p), p)
                }
            }
        }
    }

    /// Affine `y = Y/Z³`.
    pub fn y(&self) -> BigUint {
        match self {
            JacobiPoint::Infinity => panic!("point at infinity has no affine y"),
            JacobiPoint::Jacobi { curve, y, z, .. } => {
                if z.is_one() {
                    y.clone()
                } else {
                    let p = curve.p();
                    let z_inv = inverse_mod(z, p);
                    modmath::mul(&modmath::mul(y, &modmath::sqr(&z_inv, p), p), &z_inv, p)
                }
            }
        }
    }

    pub fn curve(&self) -> Option<&Arc<CurveW>> {
        match self {
            JacobiPoint::Infinity => None,
            JacobiPoint::Jacobi { curve, .. } => Some(curve),
        }
    }

    pub fn order(&self) -> Option<&BigUint> {
        match self {
            JacobiPoint::Infinity => None,
            JacobiPoint::Jacobi { order, .. } => order.as_ref(),
        }
    }

    pub fn is_generator(&self) -> bool {
        matches!(self, JacobiPoint::Jacobi { generator: true, .. })
    }

    /// Returns an equivalent point with `Z = 1`. Pure: unlike the Python
    /// source this is based on (where `scale()` mutates the point in
    /// place), every call site here immediately uses the returned value, so
    /// the in-place mutation was never load-bearing — a plain function
    /// avoids `RefCell`/interior mutability for no behavioral gain.
    pub fn scale(&self) -> JacobiPoint {
        match self {
            JacobiPoint::Infinity => JacobiPoint::Infinity,
            JacobiPoint::Jacobi {
                curve,
                x,
                y,
                z,
                order,
                generator,
                precompute,
            } => {
                if z.is_one() {
                    self.clone()
                } else {
                    let p = curve.p();
                    let z_inv = inverse_mod(z, p);
                    let zz_inv = modmath::sqr(&z_inv, p);
                    let nx = modmath::mul(x, &zz_inv, p);
                    let ny = modmath::mul(&modmath::mul(y, &zz_inv, p), &z_inv, p);
                    JacobiPoint::Jacobi {
                        curve: curve.clone(),
                        x: nx,
                        y: ny,
                        z: BigUint::one(),
                        order: order.clone(),
                        generator: *generator,
                        precompute: precompute.clone(),
                    }
                }
            }
        }
    }

    /// Converts to classical affine representation, re-asserting the
    /// on-curve invariant via [`AffinePoint::new`].
    pub fn to_affine(&self) -> AffinePoint {
        match self.scale() {
            JacobiPoint::Infinity => AffinePoint::Infinity,
            JacobiPoint::Jacobi {
                curve, x, y, order, ..
            } => AffinePoint::new(curve, x, y, order),
        }
    }

    pub fn double(&self) -> JacobiPoint {
        match self {
            JacobiPoint::Infinity => JacobiPoint::Infinity,
            JacobiPoint::Jacobi {
                curve,
                x,
                y,
                z,
                order,
                ..
            } => {
                if y.is_zero() {
                    return JacobiPoint::Infinity;
                }
                let p = curve.p();
                let a = curve.a();
                let (x3, y3, z3) = double_general(x, y, z, p, a);
                JacobiPoint::from_raw(curve.clone(), x3, y3, z3, order.clone(), false)
            }
        }
    }

    /// Combined, curve-checked addition. The `+` operator delegates here.
    pub fn checked_add(&self, other: &JacobiPoint) -> Result<JacobiPoint, Error> {
        match (self, other) {
            (JacobiPoint::Infinity, _) => Ok(other.clone()),
            (_, JacobiPoint::Infinity) => Ok(self.clone()),
            (
                JacobiPoint::Jacobi { curve: c1, .. },
                JacobiPoint::Jacobi { curve: c2, .. },
            ) => {
                if c1 != c2 {
                    return Err(Error::CurveMismatch);
                }
                Ok(self.add_same_curve(other))
            }
        }
    }

    fn add_same_curve(&self, other: &JacobiPoint) -> JacobiPoint {
        let (curve, x1, y1, z1, order) = match self {
            JacobiPoint::Infinity => return other.clone(),
            JacobiPoint::Jacobi { curve, x, y, z, order, .. } => (curve, x, y, z, order),
        };
        let (x2, y2, z2) = match other {
            JacobiPoint::Infinity => return self.clone(),
            JacobiPoint::Jacobi { x, y, z, .. } => (x, y, z),
        };
        let p = curve.p();
        let a = curve.a();
        let (x3, y3, z3) = add_raw(x1, y1, z1, x2, y2, z2, p, a);
        JacobiPoint::from_raw(curve.clone(), x3, y3, z3, order.clone(), false)
    }

    /// `k·P` for any integer `k`, including negative ones (`k·P =
    /// (−k)·(−P)`, per the crate-wide convention for signed scalars).
    pub fn scalar_mul(&self, k: &BigInt) -> JacobiPoint {
        if k.is_negative() {
            (-self).scalar_mul(&-k)
        } else {
            let k = k.to_biguint().expect("non-negative BigInt converts to BigUint");
            self.scalar_mul_nonneg(&k)
        }
    }

    fn scalar_mul_nonneg(&self, k: &BigUint) -> JacobiPoint {
        let (curve, x, y, z, order, generator, precompute) = match self {
            JacobiPoint::Infinity => return JacobiPoint::Infinity,
            JacobiPoint::Jacobi {
                curve,
                x,
                y,
                z,
                order,
                generator,
                precompute,
            } => (curve, x, y, z, order, generator, precompute),
        };
        if y.is_zero() || k.is_zero() {
            return JacobiPoint::Infinity;
        }
        if k.is_one() {
            return self.clone();
        }

        let k = match order {
            Some(ord) => k % (ord * BigUint::from(2u32)),
            None => k.clone(),
        };

        if *generator {
            let ord = order.as_ref().expect("generator point must carry an order");
            let table = precompute.get_or_init(|| build_precompute_table(curve.clone(), x, y, z, ord));
            return mul_with_table(curve.clone(), table, &k, order.clone());
        }

        let scaled = self.scale();
        let (x2, y2) = match &scaled {
            JacobiPoint::Jacobi { x, y, .. } => (x.clone(), y.clone()),
            JacobiPoint::Infinity => unreachable!("y != 0 was checked above"),
        };
        let p = curve.p();
        let a = curve.a();
        let mut acc: Triple = (BigUint::zero(), BigUint::zero(), BigUint::one());
        for d in naf(&k).into_iter().rev() {
            acc = double_general(&acc.0, &acc.1, &acc.2, p, a);
            if d < 0 {
                let neg_y2 = modmath::neg(&y2, p);
                acc = add_raw(&acc.0, &acc.1, &acc.2, &x2, &neg_y2, &BigUint::one(), p, a);
            } else if d > 0 {
                acc = add_raw(&acc.0, &acc.1, &acc.2, &x2, &y2, &BigUint::one(), p, a);
            }
        }
        JacobiPoint::from_raw(curve.clone(), acc.0, acc.1, acc.2, order.clone(), false)
    }

    /// `self·self_mul + other·other_mul`, used by signature verification.
    pub fn mul_add(
        &self,
        self_mul: &BigInt,
        other: &JacobiPoint,
        other_mul: &BigInt,
    ) -> Result<JacobiPoint, Error> {
        let (p_eff, self_mul) = normalize_scalar(self, self_mul);
        let (q_eff, other_mul) = normalize_scalar(other, other_mul);
        p_eff.mul_add_nonneg(&self_mul, &q_eff, &other_mul)
    }

    fn mul_add_nonneg(
        &self,
        self_mul: &BigUint,
        other: &JacobiPoint,
        other_mul: &BigUint,
    ) -> Result<JacobiPoint, Error> {
        if matches!(other, JacobiPoint::Infinity) || other_mul.is_zero() {
            return Ok(self.scalar_mul_nonneg(self_mul));
        }
        if self_mul.is_zero() {
            return Ok(other.scalar_mul_nonneg(other_mul));
        }
        let (curve, x1_0, y1_0, z1_0, order, generator, precompute) = match self {
            JacobiPoint::Infinity => return Ok(other.scalar_mul_nonneg(other_mul)),
            JacobiPoint::Jacobi {
                curve,
                x,
                y,
                z,
                order,
                generator,
                precompute,
            } => (curve, x, y, z, order, generator, precompute),
        };
        let (ocurve, ox_0, oy_0, oz_0, _, ogenerator, oprecompute) = match other {
            JacobiPoint::Infinity => return Ok(self.scalar_mul_nonneg(self_mul)),
            JacobiPoint::Jacobi {
                curve,
                x,
                y,
                z,
                order,
                generator,
                precompute,
            } => (curve, x, y, z, order, generator, precompute),
        };
        if curve != ocurve {
            return Err(Error::CurveMismatch);
        }

        if *generator {
            precompute.get_or_init(|| build_precompute_table(curve.clone(), x1_0, y1_0, z1_0, order.as_ref().unwrap()));
        }
        if *ogenerator {
            oprecompute.get_or_init(|| {
                build_precompute_table(ocurve.clone(), ox_0, oy_0, oz_0, other.order().unwrap())
            });
        }
        let self_has_table = precompute.get().map(|t| !t.is_empty()).unwrap_or(false);
        let other_has_table = oprecompute.get().map(|t| !t.is_empty()).unwrap_or(false);
        if self_has_table && other_has_table {
            let a = self.scalar_mul_nonneg(self_mul);
            let b = other.scalar_mul_nonneg(other_mul);
            return Ok(a.add_same_curve(&b));
        }

        let (self_mul, other_mul) = match order {
            Some(ord) => (self_mul % ord, other_mul % ord),
            None => (self_mul.clone(), other_mul.clone()),
        };

        let p = curve.p();
        let a = curve.a();
        let self_scaled = self.scale();
        let other_scaled = other.scale();
        let (x1, y1) = match &self_scaled {
            JacobiPoint::Jacobi { x, y, .. } => (x.clone(), y.clone()),
            JacobiPoint::Infinity => unreachable!(),
        };
        let (x2, y2) = match &other_scaled {
            JacobiPoint::Jacobi { x, y, .. } => (x.clone(), y.clone()),
            JacobiPoint::Infinity => unreachable!(),
        };

        let neg_y1 = modmath::neg(&y1, p);
        let neg_y2 = modmath::neg(&y2, p);
        let one = BigUint::one();

        let (mamb_x, mamb_y, mamb_z) = add_raw(&x1, &neg_y1, &one, &x2, &neg_y2, &one, p, a);
        let (pamb_x, pamb_y, pamb_z) = add_raw(&x1, &y1, &one, &x2, &neg_y2, &one, p, a);
        let (mapb_x, mapb_y, mapb_z) = add_raw(&x1, &neg_y1, &one, &x2, &y2, &one, p, a);
        let (papb_x, papb_y, papb_z) = add_raw(&x1, &y1, &one, &x2, &y2, &one, p, a);

        if papb_y.is_zero() || papb_z.is_zero() {
            let a_pt = self.scalar_mul_nonneg(&self_mul);
            let b_pt = other.scalar_mul_nonneg(&other_mul);
            return Ok(a_pt.add_same_curve(&b_pt));
        }

        let mut self_naf: Vec<i8> = naf(&self_mul).into_iter().rev().collect();
        let mut other_naf: Vec<i8> = naf(&other_mul).into_iter().rev().collect();
        if self_naf.len() < other_naf.len() {
            let pad = other_naf.len() - self_naf.len();
            let mut padded = vec![0i8; pad];
            padded.extend(self_naf);
            self_naf = padded;
        } else if other_naf.len() < self_naf.len() {
            let pad = self_naf.len() - other_naf.len();
            let mut padded = vec![0i8; pad];
            padded.extend(other_naf);
            other_naf = padded;
        }

        let mut x3 = BigUint::zero();
        let mut y3 = BigUint::zero();
        let mut z3 = BigUint::one();
        for (&da, &db) in self_naf.iter().zip(other_naf.iter()) {
            let (dx, dy, dz) = double_general(&x3, &y3, &z3, p, a);
            x3 = dx;
            y3 = dy;
            z3 = dz;
            if da == 0 && db == 0 {
                continue;
            }
            let (ax, ay, az) = if da == 0 {
                if db < 0 {
                    add_raw(&x3, &y3, &z3, &x2, &neg_y2, &one, p, a)
                } else {
                    add_raw(&x3, &y3, &z3, &x2, &y2, &one, p, a)
                }
            } else if da < 0 {
                if db == 0 {
                    add_raw(&x3, &y3, &z3, &x1, &neg_y1, &one, p, a)
                } else if db < 0 {
                    add_raw(&x3, &y3, &z3, &mamb_x, &mamb_y, &mamb_z, p, a)
                } else {
                    add_raw(&x3, &y3, &z3, &mapb_x, &mapb_y, &mapb_z, p, a)
                }
            } else if db == 0 {
                add_raw(&x3, &y3, &z3, &x1, &y1, &one, p, a)
            } else if db < 0 {
                add_raw(&x3, &y3, &z3, &pamb_x, &pamb_y, &pamb_z, p, a)
            } else {
                add_raw(&x3, &y3, &z3, &papb_x, &papb_y, &papb_z, p, a)
            };
            x3 = ax;
            y3 = ay;
            z3 = az;
        }

        Ok(JacobiPoint::from_raw(curve.clone(), x3, y3, z3, order.clone(), false))
    }
}

fn normalize_scalar(p: &JacobiPoint, k: &BigInt) -> (JacobiPoint, BigUint) {
    if k.is_negative() {
        (-p, (-k).to_biguint().expect("negated negative is non-negative"))
    } else {
        (p.clone(), k.to_biguint().expect("non-negative BigInt converts to BigUint"))
    }
}

impl std::ops::Add<&JacobiPoint> for &JacobiPoint {
    type Output = Result<JacobiPoint, Error>;
    fn add(self, other: &JacobiPoint) -> Result<JacobiPoint, Error> {
        self.checked_add(other)
    }
}

impl std::ops::Neg for &JacobiPoint {
    type Output = JacobiPoint;
    fn neg(self) -> JacobiPoint {
        match self {
            JacobiPoint::Infinity => JacobiPoint::Infinity,
            JacobiPoint::Jacobi {
                curve,
                x,
                y,
                z,
                order,
                generator,
                precompute,
            } => JacobiPoint::Jacobi {
                curve: curve.clone(),
                x: x.clone(),
                y: modmath::neg(y, curve.p()),
                z: z.clone(),
                order: order.clone(),
                generator: *generator,
                precompute: precompute.clone(),
            },
        }
    }
}

impl PartialEq for JacobiPoint {
    /// Cross-multiplies by `Z²`/`Z³` rather than converting to affine, to
    /// avoid an inversion per comparison.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (JacobiPoint::Infinity, JacobiPoint::Infinity) => true,
            (JacobiPoint::Infinity, JacobiPoint::Jacobi { .. })
            | (JacobiPoint::Jacobi { .. }, JacobiPoint::Infinity) => false,
            (
                JacobiPoint::Jacobi {
                    curve: c1,
                    x: x1,
                    y: y1,
                    z: z1,
                    ..
                },
                JacobiPoint::Jacobi {
                    curve: c2,
                    x: x2,
                    y: y2,
                    z: z2,
                    ..
                },
            ) => {
                if c1 != c2 {
                    return false;
                }
                let p = c1.p();
                let zz1 = modmath::sqr(z1, p);
                let zz2 = modmath::sqr(z2, p);
                modmath::sub(&modmath::mul(x1, &zz2, p), &modmath::mul(x2, &zz1, p), p).is_zero()
                    && modmath::sub(
                        &modmath::mul(&modmath::mul(y1, &zz2, p), z2, p),
                        &modmath::mul(&modmath::mul(y2, &zz1, p), z1, p),
                        p,
                    )
                    .is_zero()
            }
        }
    }
}

impl Eq for JacobiPoint {}

impl PartialEq<AffinePoint> for JacobiPoint {
    fn eq(&self, other: &AffinePoint) -> bool {
        self == &JacobiPoint::from(other)
    }
}

impl From<&AffinePoint> for JacobiPoint {
    fn from(p: &AffinePoint) -> Self {
        match p {
            AffinePoint::Infinity => JacobiPoint::Infinity,
            AffinePoint::Affine {
                curve, x, y, order, ..
            } => JacobiPoint::from_affine(curve.clone(), x.clone(), y.clone(), order.clone(), false),
        }
    }
}

// --- free-standing formula implementations -------------------------------

fn double_with_z1(x1: &BigUint, y1: &BigUint, p: &BigUint, a: &BigUint) -> Triple {
    let xx = modmath::sqr(x1, p);
    let yy = modmath::sqr(y1, p);
    if yy.is_zero() {
        return (BigUint::zero(), BigUint::zero(), BigUint::one());
    }
    let yyyy = modmath::sqr(&yy, p);
    let sum_sq = modmath::sqr(&modmath::add(x1, &yy, p), p);
    let s = modmath::double(&modmath::sub(&modmath::sub(&sum_sq, &xx, p), &yyyy, p), p);
    let m = modmath::add(&modmath::scale_small(&xx, 3, p), a, p);
    let t = modmath::sub(&modmath::sqr(&m, p), &modmath::double(&s, p), p);
    let y3 = modmath::sub(&modmath::mul(&m, &modmath::sub(&s, &t, p), p), &modmath::scale_small(&yyyy, 8, p), p);
    let z3 = modmath::double(y1, p);
    (t, y3, z3)
}

fn double_general(x1: &BigUint, y1: &BigUint, z1: &BigUint, p: &BigUint, a: &BigUint) -> Triple {
    if z1.is_one() {
        return double_with_z1(x1, y1, p, a);
    }
    if y1.is_zero() || z1.is_zero() {
        return (BigUint::zero(), BigUint::zero(), BigUint::one());
    }
    let xx = modmath::sqr(x1, p);
    let yy = modmath::sqr(y1, p);
    if yy.is_zero() {
        return (BigUint::zero(), BigUint::zero(), BigUint::one());
    }
    let yyyy = modmath::sqr(&yy, p);
    let zz = modmath::sqr(z1, p);
    let sum_sq = modmath::sqr(&modmath::add(x1, &yy, p), p);
    let s = modmath::double(&modmath::sub(&modmath::sub(&sum_sq, &xx, p), &yyyy, p), p);
    let m = modmath::add(&modmath::scale_small(&xx, 3, p), &modmath::mul(a, &modmath::sqr(&zz, p), p), p);
    let t = modmath::sub(&modmath::sqr(&m, p), &modmath::double(&s, p), p);
    let y3 = modmath::sub(&modmath::mul(&m, &modmath::sub(&s, &t, p), p), &modmath::scale_small(&yyyy, 8, p), p);
    let z3 = modmath::sub(&modmath::sub(&modmath::sqr(&modmath::add(y1, z1, p), p), &yy, p), &zz, p);
    (t, y3, z3)
}

fn add_z1(x1: &BigUint, y1: &BigUint, x2: &BigUint, y2: &BigUint, p: &BigUint, a: &BigUint) -> Triple {
    let h = modmath::sub(x2, x1, p);
    let hh = modmath::sqr(&h, p);
    let i = modmath::scale_small(&hh, 4, p);
    let j = modmath::mul(&h, &i, p);
    let r = modmath::double(&modmath::sub(y2, y1, p), p);
    if h.is_zero() && r.is_zero() {
        return double_with_z1(x1, y1, p, a);
    }
    let v = modmath::mul(x1, &i, p);
    let x3 = modmath::sub(&modmath::sub(&modmath::sqr(&r, p), &j, p), &modmath::double(&v, p), p);
    let y3 = modmath::sub(&modmath::mul(&r, &modmath::sub(&v, &x3, p), p), &modmath::double(&modmath::mul(y1, &j, p), p), p);
    let z3 = modmath::double(&h, p);
    (x3, y3, z3)
}

fn add_z_eq(x1: &BigUint, y1: &BigUint, z1: &BigUint, x2: &BigUint, y2: &BigUint, p: &BigUint, a: &BigUint) -> Triple {
    let xdiff = modmath::sub(x2, x1, p);
    let aa = modmath::sqr(&xdiff, p);
    let bb = modmath::mul(x1, &aa, p);
    let cc = modmath::mul(x2, &aa, p);
    let ydiff = modmath::sub(y2, y1, p);
    let dd = modmath::sqr(&ydiff, p);
    if aa.is_zero() && dd.is_zero() {
        return double_general(x1, y1, z1, p, a);
    }
    let x3 = modmath::sub(&modmath::sub(&dd, &bb, p), &cc, p);
    let y3 = modmath::sub(&modmath::mul(&ydiff, &modmath::sub(&bb, &x3, p), p), &modmath::mul(y1, &modmath::sub(&cc, &bb, p), p), p);
    let z3 = modmath::mul(z1, &xdiff, p);
    (x3, y3, z3)
}

fn add_z2_1(x1: &BigUint, y1: &BigUint, z1: &BigUint, x2: &BigUint, y2: &BigUint, p: &BigUint, a: &BigUint) -> Triple {
    let z1z1 = modmath::sqr(z1, p);
    let u2 = modmath::mul(x2, &z1z1, p);
    let s2 = modmath::mul(&modmath::mul(y2, z1, p), &z1z1, p);
    let h = modmath::sub(&u2, x1, p);
    let hh = modmath::sqr(&h, p);
    let i = modmath::scale_small(&hh, 4, p);
    let j = modmath::mul(&h, &i, p);
    let r = modmath::double(&modmath::sub(&s2, y1, p), p);
    if r.is_zero() && h.is_zero() {
        return double_with_z1(x2, y2, p, a);
    }
    let v = modmath::mul(x1, &i, p);
    let x3 = modmath::sub(&modmath::sub(&modmath::sqr(&r, p), &j, p), &modmath::double(&v, p), p);
    let y3 = modmath::sub(&modmath::mul(&r, &modmath::sub(&v, &x3, p), p), &modmath::double(&modmath::mul(y1, &j, p), p), p);
    let z3 = modmath::sub(&modmath::sub(&modmath::sqr(&modmath::add(z1, &h, p), p), &z1z1, p), &hh, p);
    (x3, y3, z3)
}

#[allow(clippy::too_many_arguments)]
fn add_z_ne(
    x1: &BigUint,
    y1: &BigUint,
    z1: &BigUint,
    x2: &BigUint,
    y2: &BigUint,
    z2: &BigUint,
    p: &BigUint,
    a: &BigUint,
) -> Triple {
    let z1z1 = modmath::sqr(z1, p);
    let z2z2 = modmath::sqr(z2, p);
    let u1 = modmath::mul(x1, &z2z2, p);
    let u2 = modmath::mul(x2, &z1z1, p);
    let s1 = modmath::mul(&modmath::mul(y1, z2, p), &z2z2, p);
    let s2 = modmath::mul(&modmath::mul(y2, z1, p), &z1z1, p);
    let h = modmath::sub(&u2, &u1, p);
    let i = modmath::scale_small(&modmath::sqr(&h, p), 4, p);
    let j = modmath::mul(&h, &i, p);
    let r = modmath::double(&modmath::sub(&s2, &s1, p), p);
    if h.is_zero() && r.is_zero() {
        return double_general(x1, y1, z1, p, a);
    }
    let v = modmath::mul(&u1, &i, p);
    let x3 = modmath::sub(&modmath::sub(&modmath::sqr(&r, p), &j, p), &modmath::double(&v, p), p);
    let y3 = modmath::sub(&modmath::mul(&r, &modmath::sub(&v, &x3, p), p), &modmath::double(&modmath::mul(&s1, &j, p), p), p);
    let z3 = modmath::mul(&modmath::sub(&modmath::sub(&modmath::sqr(&modmath::add(z1, z2, p), p), &z1z1, p), &z2z2, p), &h, p);
    (x3, y3, z3)
}

#[allow(clippy::too_many_arguments)]
fn add_raw(
    x1: &BigUint,
    y1: &BigUint,
    z1: &BigUint,
    x2: &BigUint,
    y2: &BigUint,
    z2: &BigUint,
    p: &BigUint,
    a: &BigUint,
) -> Triple {
    if y1.is_zero() || z1.is_zero() {
        return (x2.clone(), y2.clone(), z2.clone());
    }
    if y2.is_zero() || z2.is_zero() {
        return (x1.clone(), y1.clone(), z1.clone());
    }
    if z1 == z2 {
        if z1.is_one() {
            add_z1(x1, y1, x2, y2, p, a)
        } else {
            add_z_eq(x1, y1, z1, x2, y2, p, a)
        }
    } else if z1.is_one() {
        add_z2_1(x2, y2, z2, x1, y1, p, a)
    } else if z2.is_one() {
        add_z2_1(x1, y1, z1, x2, y2, p, a)
    } else {
        add_z_ne(x1, y1, z1, x2, y2, z2, p, a)
    }
}

/// Non-adjacent form of `k`, least-significant digit first.
pub(crate) fn naf(k: &BigUint) -> Vec<i8> {
    let mut ret = Vec::new();
    let mut k = k.clone();
    let two = BigUint::from(2u32);
    let four = BigUint::from(4u32);
    while !k.is_zero() {
        if (&k % &two).is_one() {
            let nd4 = (&k % &four).to_u32().expect("k % 4 fits in u32");
            let nd: i8 = if nd4 >= 2 { nd4 as i8 - 4 } else { nd4 as i8 };
            ret.push(nd);
            if nd < 0 {
                k += BigUint::from((-nd) as u32);
            } else {
                k -= BigUint::from(nd as u32);
            }
        } else {
            ret.push(0);
        }
        k /= &two;
    }
    ret
}

fn build_precompute_table(
    curve: Arc<CurveW>,
    x: &BigUint,
    y: &BigUint,
    z: &BigUint,
    order: &BigUint,
) -> Vec<(BigUint, BigUint)> {
    let mut m = order * BigUint::from(2u32);
    let mut doubler = JacobiPoint::from_raw(curve, x.clone(), y.clone(), z.clone(), Some(m.clone()), false);
    m *= BigUint::from(2u32);
    let mut table = Vec::new();
    table.push((doubler.x(), doubler.y()));

    let mut i = BigUint::one();
    while i < m {
        i *= BigUint::from(2u32);
        doubler = doubler.double().scale();
        table.push((doubler.x(), doubler.y()));
    }
    table
}

fn mul_with_table(
    curve: Arc<CurveW>,
    table: &[(BigUint, BigUint)],
    k: &BigUint,
    order: Option<BigUint>,
) -> JacobiPoint {
    let p = curve.p();
    let a = curve.a();
    let mut x3 = BigUint::zero();
    let mut y3 = BigUint::zero();
    let mut z3 = BigUint::one();
    let mut k = k.clone();
    let two = BigUint::from(2u32);
    let four = BigUint::from(4u32);
    let one = BigUint::one();

    for (x2, y2) in table {
        if (&k % &two).is_one() {
            if (&k % &four) >= two {
                k = (&k + &one) / &two;
                let neg_y2 = modmath::neg(y2, p);
                let (nx, ny, nz) = add_raw(&x3, &y3, &z3, x2, &neg_y2, &one, p, a);
                x3 = nx;
                y3 = ny;
                z3 = nz;
            } else {
                k = (&k - &one) / &two;
                let (nx, ny, nz) = add_raw(&x3, &y3, &z3, x2, y2, &one, p, a);
                x3 = nx;
                y3 = ny;
                z3 = nz;
            }
        } else {
            k /= &two;
        }
    }

    JacobiPoint::from_raw(curve, x3, y3, z3, order, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    // y^2 = x^3 + 2x + 3 over GF(97); order of (3, 6) is 5, cofactor h verified by hand.
    fn tiny_curve() -> Arc<CurveW> {
        Arc::new(CurveW::new(BigUint::from(97u32), 2, 3, None))
    }

    fn base_point(curve: Arc<CurveW>) -> JacobiPoint {
        JacobiPoint::from_affine(curve, BigUint::from(3u32), BigUint::from(6u32), Some(BigUint::from(5u32)), false)
    }

    #[test]
    fn double_stays_on_curve() {
        let curve = tiny_curve();
        let g = base_point(curve.clone());
        let d = g.double();
        let affine = d.to_affine();
        assert!(matches!(affine, AffinePoint::Affine { .. }));
    }

    #[test]
    fn addition_matches_doubling() {
        let curve = tiny_curve();
        let g = base_point(curve);
        let sum = (&g + &g).unwrap();
        assert_eq!(sum, g.double());
    }

    #[test]
    fn order_times_point_is_infinity() {
        let curve = tiny_curve();
        let g = base_point(curve);
        let five = BigInt::from(5);
        assert_eq!(g.scalar_mul(&five), JacobiPoint::Infinity);
    }

    #[test]
    fn scalar_one_is_identity_operation() {
        let curve = tiny_curve();
        let g = base_point(curve);
        assert_eq!(g.scalar_mul(&BigInt::from(1)), g);
    }

    #[test]
    fn scalar_zero_is_infinity() {
        let curve = tiny_curve();
        let g = base_point(curve);
        assert_eq!(g.scalar_mul(&BigInt::from(0)), JacobiPoint::Infinity);
    }

    #[test]
    fn negative_scalar_matches_negated_point() {
        let curve = tiny_curve();
        let g = base_point(curve);
        let neg_three = BigInt::from(-3);
        let three = BigInt::from(3);
        assert_eq!(g.scalar_mul(&neg_three), (-&g).scalar_mul(&three));
    }

    #[test]
    fn addition_is_commutative() {
        let curve = tiny_curve();
        let g = base_point(curve);
        let h = g.double();
        assert_eq!((&g + &h).unwrap(), (&h + &g).unwrap());
    }

    #[test]
    fn scale_is_idempotent_on_coordinates() {
        let curve = tiny_curve();
        let g = base_point(curve);
        let d = g.double();
        let scaled_once = d.scale();
        let scaled_twice = scaled_once.scale();
        assert_eq!(scaled_once.x(), scaled_twice.x());
        assert_eq!(scaled_once.y(), scaled_twice.y());
    }

    #[test]
    fn mul_add_matches_two_multiply_reference() {
        let curve = tiny_curve();
        let g = base_point(curve);
        let q = g.double();
        let k1 = BigInt::from(2);
        let k2 = BigInt::from(3);
        let lhs = g.mul_add(&k1, &q, &k2).unwrap();
        let rhs = (&g.scalar_mul(&k1) + &q.scalar_mul(&k2)).unwrap();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn checked_add_rejects_curve_mismatch() {
        let curve1 = tiny_curve();
        let curve2 = Arc::new(CurveW::new(BigUint::from(97u32), 5, 11, None));
        let p = base_point(curve1);
        let q = JacobiPoint::from_affine(curve2, BigUint::from(1u32), {
            // contains_point must hold for 11 + 5 + 1 = 17 to be a QR mod 97; use brute force
            let mut found = None;
            for y in 0u32..97 {
                if (y * y) % 97 == 17 {
                    found = Some(y);
                    break;
                }
            }
            BigUint::from(found.expect("17 is a QR mod 97"))
        }, None, false);
        assert_eq!((&p + &q).unwrap_err(), Error::CurveMismatch);
    }

    #[test]
    fn precompute_table_length_matches_derived_formula() {
        let curve = tiny_curve();
        let x = BigUint::from(3u32);
        let y = BigUint::from(6u32);
        let z = BigUint::one();
        let order = BigUint::from(5u32);
        let table = build_precompute_table(curve, &x, &y, &z, &order);
        // Hand-traced for order = 5: m ends at 4*5 = 20; i doubles
        // 1 -> 2 -> 4 -> 8 -> 16 -> 32 (five doublings past the loop bound),
        // plus the one entry pushed before the loop: 5 + 1 = 6, matching
        // the derived ceil(log2(order)) + 3 = 3 + 3 = 6 (see DESIGN.md).
        assert_eq!(table.len(), 6);
    }

    #[test]
    fn generator_scalar_mul_matches_non_generator_path() {
        let curve = tiny_curve();
        let order = Some(BigUint::from(5u32));
        // Same point, once marked `generator` (builds and uses the
        // precompute table) and once not (plain NAF ladder), so the two
        // code paths can be checked against each other.
        let g = JacobiPoint::from_affine(curve.clone(), BigUint::from(3u32), BigUint::from(6u32), order.clone(), true);
        let g_plain = JacobiPoint::from_affine(curve, BigUint::from(3u32), BigUint::from(6u32), order, false);

        for k in 2u32..10 {
            let k = BigInt::from(k);
            assert_eq!(g.scalar_mul(&k), g_plain.scalar_mul(&k), "mismatch for k = {k}");
        }
    }

    #[test]
    fn naf_round_trips_to_original_value() {
        for k in 1u32..200 {
            let digits = naf(&BigUint::from(k));
            let mut total = BigInt::from(0);
            for (i, &d) in digits.iter().enumerate() {
                total += BigInt::from(d) * (BigInt::from(1) << i);
            }
            assert_eq!(total, BigInt::from(k));
            for w in digits.windows(2) {
                assert!(w[0] == 0 || w[1] == 0, "NAF must have no two adjacent nonzero digits");
            }
        }
    }
}
