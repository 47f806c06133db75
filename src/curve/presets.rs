//! Named curve parameter sets.
//!
//! Curve domain parameters only — no point objects are constructed here,
//! to keep this module a leaf of the dependency graph alongside
//! [`crate::curve::CurveW`]/[`crate::curve::CurveE`] (see the module docs
//! of [`crate::point`] for why points live in their own module instead).
//! Callers build a generator point from the returned `gx`/`gy`/`order` via
//! [`crate::point::JacobiPoint::from_affine`] or
//! [`crate::point::EdwardsPoint::from_affine`] with `generator = true`.

use std::sync::Arc;

use num_bigint::BigUint;

use crate::curve::{CurveE, CurveW};

/// A short-Weierstrass curve's domain parameters plus its standard base
/// point and subgroup order.
pub struct WeierstrassParams {
    pub curve: Arc<CurveW>,
    pub gx: BigUint,
    pub gy: BigUint,
    pub order: BigUint,
}

/// A twisted-Edwards curve's domain parameters plus its standard base
/// point and subgroup order.
pub struct EdwardsParams {
    pub curve: Arc<CurveE>,
    pub gx: BigUint,
    pub gy: BigUint,
    pub order: BigUint,
}

fn hex_to_biguint(s: &str) -> BigUint {
    BigUint::parse_bytes(s.as_bytes(), 16).expect("hard-coded hex constant is well-formed")
}

/// NIST P-256 (secp256r1, X9.62 `prime256v1`).
pub fn nist_p256() -> WeierstrassParams {
    let p = hex_to_biguint(
        "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff",
    );
    let b = hex_to_biguint(
        "5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b",
    );
    let order = hex_to_biguint(
        "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551",
    );
    let gx = hex_to_biguint(
        "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296",
    );
    let gy = hex_to_biguint(
        "4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5",
    );
    WeierstrassParams {
        curve: Arc::new(CurveW::new(p, -3, b, Some(BigUint::from(1u32)))),
        gx,
        gy,
        order,
    }
}

/// secp256k1 (the Bitcoin/Ethereum curve): `y² = x³ + 7`.
pub fn secp256k1() -> WeierstrassParams {
    let p = hex_to_biguint(
        "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
    );
    let order = hex_to_biguint(
        "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141",
    );
    let gx = hex_to_biguint(
        "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
    );
    let gy = hex_to_biguint(
        "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
    );
    WeierstrassParams {
        curve: Arc::new(CurveW::new(p, 0, 7, Some(BigUint::from(1u32)))),
        gx,
        gy,
        order,
    }
}

/// Ed25519's curve: the twisted-Edwards curve `-x² + y² = 1 + d·x²·y²` over
/// `GF(2²⁵⁵ - 19)`, with `d = -121665/121666`. Cofactor `8`.
pub fn ed25519() -> EdwardsParams {
    let p = {
        let mut p = BigUint::from(1u32) << 255;
        p -= BigUint::from(19u32);
        p
    };
    let order = {
        // ℓ = 2^252 + 27742317777372353535851937790883648493
        (BigUint::from(1u32) << 252)
            + hex_to_biguint("14def9dea2f79cd65812631a5cf5d3ed")
    };
    // d = -121665 * inverse_mod(121666, p) mod p
    let d = {
        let num = &p - BigUint::from(121665u32);
        let den_inv = crate::numeric::inverse_mod(&BigUint::from(121666u32), &p);
        (num * den_inv) % &p
    };
    let gy = {
        // gy = 4 * inverse_mod(5, p) mod p
        let inv5 = crate::numeric::inverse_mod(&BigUint::from(5u32), &p);
        (BigUint::from(4u32) * inv5) % &p
    };
    let curve = Arc::new(CurveE::new(p.clone(), -1, d, Some(BigUint::from(8u32))));
    // gx is the unique even-parity square root of (gy^2 - 1) / (d * gy^2 + 1).
    let gx = recover_edwards_x(&curve, &gy);
    EdwardsParams {
        curve,
        gx,
        gy,
        order,
    }
}

/// Recovers the even-parity `x` for the Ed25519 base point's `y`, following
/// the curve equation `x² = (y² − 1) / (d·y² + 1) mod p`.
fn recover_edwards_x(curve: &CurveE, y: &BigUint) -> BigUint {
    use crate::modmath;
    use crate::numeric::{inverse_mod, square_root_mod_prime};

    let p = curve.p();
    let yy = modmath::sqr(y, p);
    let num = modmath::sub(&yy, &BigUint::from(1u32), p);
    let den = modmath::add(&modmath::mul(curve.d(), &yy, p), &BigUint::from(1u32), p);
    let xx = modmath::mul(&num, &inverse_mod(&den, p), p);
    let x = square_root_mod_prime(&xx, p).expect("Ed25519 base point y has a valid x");
    if &x % BigUint::from(2u32) == BigUint::from(0u32) {
        x
    } else {
        p - x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nist_p256_generator_is_on_curve() {
        let params = nist_p256();
        assert!(params.curve.contains_point(&params.gx, &params.gy));
    }

    #[test]
    fn secp256k1_generator_is_on_curve() {
        let params = secp256k1();
        assert!(params.curve.contains_point(&params.gx, &params.gy));
    }

    #[test]
    fn ed25519_generator_is_on_curve() {
        let params = ed25519();
        assert!(params.curve.contains_point(&params.gx, &params.gy));
    }

    #[test]
    fn ed25519_base_point_x_is_even() {
        let params = ed25519();
        assert_eq!(&params.gx % BigUint::from(2u32), BigUint::from(0u32));
    }
}
