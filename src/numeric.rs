//! Number-theory helpers consumed by the rest of the crate: `inverse_mod`,
//! `square_root_mod_prime`, `number_to_string`, `string_to_number`, and
//! `orderlen`, implemented on top of [`num_bigint`].

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

/// Raised by [`square_root_mod_prime`] when `a` is a quadratic non-residue.
///
/// Kept distinct from [`crate::error::Error`] because this is a pure
/// number-theory failure; callers that decode points translate it into
/// `Error::MalformedPoint`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquareRootError;

/// Computes `a⁻¹ mod m` via the extended Euclidean algorithm.
///
/// # Panics
///
/// Panics if `gcd(a, m) != 1`; callers only ever invoke this with moduli
/// that are prime (curve field primes or point orders), so a missing
/// inverse is a programmer error, not a recoverable condition.
pub fn inverse_mod(a: &BigUint, m: &BigUint) -> BigUint {
    assert!(!m.is_zero(), "modulus must be nonzero");
    let a = a % m;
    assert!(!a.is_zero(), "a has no inverse mod m");

    let (mut old_r, mut r) = (BigInt::from(m.clone()), BigInt::from(a));
    let (mut old_s, mut s) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let q = &old_r / &r;
        let new_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, new_r);
        let new_s = &old_s - &q * &s;
        old_s = std::mem::replace(&mut s, new_s);
    }

    assert!(old_r == BigInt::one(), "a and m are not coprime");

    let m_big = BigInt::from(m.clone());
    let result = (old_s % &m_big + &m_big) % &m_big;
    result
        .to_biguint()
        .expect("result of mod reduction by a positive modulus is non-negative")
}

/// Computes `β` with `β² ≡ a (mod p)` for an odd prime `p`, via the
/// Tonelli–Shanks algorithm (with the `p ≡ 3 (mod 4)` shortcut applied
/// when it holds).
///
/// Returns [`SquareRootError`] if `a` is a quadratic non-residue mod `p`.
pub fn square_root_mod_prime(a: &BigUint, p: &BigUint) -> Result<BigUint, SquareRootError> {
    let zero = BigUint::zero();
    let one = BigUint::one();
    let two = BigUint::from(2u32);

    let a = a % p;
    if a.is_zero() {
        return Ok(zero);
    }
    if p == &two {
        return Ok(a);
    }

    let p_minus_1 = p - &one;
    let euler = a.modpow(&(&p_minus_1 / &two), p);
    if euler != one {
        return Err(SquareRootError);
    }

    let four = BigUint::from(4u32);
    if &(p % &four) == &BigUint::from(3u32) {
        return Ok(a.modpow(&((p + &one) / &four), p));
    }

    // General Tonelli–Shanks: factor p - 1 = q * 2^s with q odd.
    let mut q = p_minus_1.clone();
    let mut s = 0u32;
    while (&q).is_even() {
        q /= &two;
        s += 1;
    }

    // Find a quadratic non-residue z.
    let mut z = two.clone();
    loop {
        let ls = z.modpow(&(&p_minus_1 / &two), p);
        if ls == p_minus_1 {
            break;
        }
        z += &one;
    }

    let mut m = s;
    let mut c = z.modpow(&q, p);
    let mut t = a.modpow(&q, p);
    let mut r = a.modpow(&((&q + &one) / &two), p);

    loop {
        if t == one {
            return Ok(r);
        }
        let mut i = 0u32;
        let mut t2i = t.clone();
        while t2i != one {
            t2i = (&t2i * &t2i) % p;
            i += 1;
            if i == m {
                return Err(SquareRootError);
            }
        }
        let exp = &one << (m - i - 1);
        let b = c.modpow(&exp, p);
        m = i;
        c = (&b * &b) % p;
        t = (&t * &c) % p;
        r = (&r * &b) % p;
    }
}

/// `ceil(bitlen(n) / 8)`, the byte length needed to hold `n`.
pub fn orderlen(n: &BigUint) -> usize {
    if n.is_zero() {
        0
    } else {
        n.bits().div_ceil(8) as usize
    }
}

/// Encodes `n` as big-endian bytes, zero-padded to `orderlen(max)` bytes.
pub fn number_to_string(n: &BigUint, max: &BigUint) -> Vec<u8> {
    let len = orderlen(max);
    let raw = n.to_bytes_be();
    assert!(raw.len() <= len, "value does not fit in orderlen(max) bytes");
    let mut out = vec![0u8; len - raw.len()];
    out.extend_from_slice(&raw);
    out
}

/// Decodes a big-endian byte string into a non-negative integer.
pub fn string_to_number(data: &[u8]) -> BigUint {
    BigUint::from_bytes_be(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_mod_small_prime() {
        let p = BigUint::from(23u32);
        for a in 1u32..23 {
            let a = BigUint::from(a);
            let inv = inverse_mod(&a, &p);
            assert_eq!((&a * &inv) % &p, BigUint::one());
        }
    }

    #[test]
    fn square_root_known_residue() {
        let p = BigUint::from(23u32);
        // 4 is a QR mod 23: 2^2 = 4
        let root = square_root_mod_prime(&BigUint::from(4u32), &p).unwrap();
        assert_eq!((&root * &root) % &p, BigUint::from(4u32));
    }

    #[test]
    fn square_root_non_residue_errors() {
        let p = BigUint::from(23u32);
        // 5 is a non-residue mod 23
        assert_eq!(
            square_root_mod_prime(&BigUint::from(5u32), &p),
            Err(SquareRootError)
        );
    }

    #[test]
    fn square_root_p_equiv_one_mod_8_uses_general_path() {
        // p = 17 ≡ 1 (mod 8), forces the general Tonelli-Shanks branch.
        let p = BigUint::from(17u32);
        for a in 1u32..17 {
            let a = BigUint::from(a);
            if let Ok(root) = square_root_mod_prime(&a, &p) {
                assert_eq!((&root * &root) % &p, a);
            }
        }
    }

    #[test]
    fn number_to_string_round_trip() {
        let max = BigUint::from(65535u32);
        let n = BigUint::from(42u32);
        let bytes = number_to_string(&n, &max);
        assert_eq!(bytes.len(), orderlen(&max));
        assert_eq!(string_to_number(&bytes), n);
    }

    #[test]
    fn orderlen_matches_bit_length() {
        assert_eq!(orderlen(&BigUint::from(0xFFu32)), 1);
        assert_eq!(orderlen(&BigUint::from(0x100u32)), 2);
    }
}
