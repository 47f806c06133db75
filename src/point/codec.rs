//! Byte encodings for affine points on a short-Weierstrass curve.
//!
//! Implements the four X9.62/SEC1 octet-string encodings: `raw`,
//! `uncompressed`, `compressed`, and `hybrid`. Decoding only recovers
//! `(x, y)` — it does not check curve membership; the caller constructs a
//! point from the pair, which performs that check (see
//! [`crate::point::AffinePoint::new`] / [`crate::point::JacobiPoint::from_affine`]).
//!
//! [`encode`] only needs the field prime `p`, so it serves both curve
//! families — [`crate::point::EdwardsPoint::to_bytes`] calls it directly.
//! [`decode`] is short-Weierstrass-only: compressed decompression is
//! hard-coded to the short-Weierstrass curve equation (`curve.a()`/
//! `curve.b()`), which `CurveE` has no equivalent of, so `EdwardsPoint` gets
//! no `from_bytes` of its own (matching the source, whose `PointEdwards`
//! never overrides the inherited `from_bytes` either — it only ever
//! recovers a raw `(x, y)` tuple, never a constructed point).

use num_bigint::BigUint;
use num_traits::One;

use crate::curve::CurveW;
use crate::error::Error;
use crate::numeric::{number_to_string, orderlen, square_root_mod_prime, string_to_number};

/// One of the four point encodings this crate supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// `x‖y`, big-endian, no tag byte.
    Raw,
    /// `0x04 ‖ x ‖ y`.
    Uncompressed,
    /// `{0x02 if y even else 0x03} ‖ x`.
    Compressed,
    /// `{0x06 if y even else 0x07} ‖ x ‖ y`.
    Hybrid,
}

/// All four encodings, the default set accepted by [`decode`] when the
/// caller imposes no restriction.
pub const ALL_ENCODINGS: [Encoding; 4] = [
    Encoding::Raw,
    Encoding::Uncompressed,
    Encoding::Compressed,
    Encoding::Hybrid,
];

impl Encoding {
    /// Parses one of `"raw"`, `"uncompressed"`, `"compressed"`, `"hybrid"`.
    ///
    /// This is the entry point through which an unrecognised encoding name
    /// becomes [`Error::InvalidEncodingName`]. The typed [`decode`]/[`encode`]
    /// entry points below take `Encoding` values directly and so can't
    /// observe that error; callers accepting encoding names as strings
    /// (e.g. from configuration) should go through this parser first.
    pub fn parse(name: &str) -> Result<Self, Error> {
        match name {
            "raw" => Ok(Encoding::Raw),
            "uncompressed" => Ok(Encoding::Uncompressed),
            "compressed" => Ok(Encoding::Compressed),
            "hybrid" => Ok(Encoding::Hybrid),
            other => Err(Error::InvalidEncodingName(other.to_string())),
        }
    }
}

fn from_raw(data: &[u8], raw_encoding_length: usize) -> (BigUint, BigUint) {
    let half = raw_encoding_length / 2;
    let (xs, ys) = data.split_at(half);
    (string_to_number(xs), string_to_number(ys))
}

fn from_compressed(data: &[u8], curve: &CurveW) -> Result<(BigUint, BigUint), Error> {
    let is_even = match data[0] {
        0x02 => true,
        0x03 => false,
        _ => {
            return Err(Error::MalformedPoint {
                reason: "malformed compressed point encoding".into(),
            });
        }
    };
    let x = string_to_number(&data[1..]);
    let p = curve.p();
    let alpha = {
        use crate::modmath;
        modmath::add(&modmath::mul(&modmath::sqr(&x, p), &x, p), &modmath::mul(curve.a(), &x, p), p)
    };
    let alpha = {
        use crate::modmath;
        modmath::add(&alpha, curve.b(), p)
    };
    let beta = square_root_mod_prime(&alpha, p).map_err(|_| Error::MalformedPoint {
        reason: "encoding does not correspond to a point on curve".into(),
    })?;
    let beta_is_odd = &beta % BigUint::from(2u32) == BigUint::one();
    let y = if is_even == beta_is_odd { p - &beta } else { beta };
    Ok((x, y))
}

fn from_hybrid(
    data: &[u8],
    raw_encoding_length: usize,
    validate_encoding: bool,
) -> Result<(BigUint, BigUint), Error> {
    let (x, y) = from_raw(&data[1..], raw_encoding_length);
    if validate_encoding {
        let y_is_odd = &y % BigUint::from(2u32) == BigUint::one();
        let tag = data[0];
        if (y_is_odd && tag != 0x07) || (!y_is_odd && tag != 0x06) {
            return Err(Error::MalformedPoint {
                reason: "inconsistent hybrid point encoding".into(),
            });
        }
    }
    Ok((x, y))
}

/// Decodes an affine point `(x, y)` from its byte encoding, auto-detecting
/// which of `valid_encodings` it uses from the data's length and leading
/// tag. Does not verify that `(x, y)` lies on `curve`.
pub fn decode(
    curve: &CurveW,
    data: &[u8],
    validate_encoding: bool,
    valid_encodings: &[Encoding],
) -> Result<(BigUint, BigUint), Error> {
    let contains = |e: Encoding| valid_encodings.contains(&e);
    let raw_encoding_length = 2 * orderlen(curve.p());
    let key_len = data.len();

    if key_len == raw_encoding_length && contains(Encoding::Raw) {
        Ok(from_raw(data, raw_encoding_length))
    } else if key_len == raw_encoding_length + 1
        && (contains(Encoding::Hybrid) || contains(Encoding::Uncompressed))
    {
        match data[0] {
            0x06 | 0x07 if contains(Encoding::Hybrid) => {
                from_hybrid(data, raw_encoding_length, validate_encoding)
            }
            0x04 if contains(Encoding::Uncompressed) => Ok(from_raw(&data[1..], raw_encoding_length)),
            _ => Err(Error::MalformedPoint {
                reason: "invalid X9.62 encoding of the public point".into(),
            }),
        }
    } else if key_len == raw_encoding_length / 2 + 1 && contains(Encoding::Compressed) {
        from_compressed(data, curve)
    } else {
        Err(Error::MalformedPoint {
            reason: "length of string does not match lengths of any of the enabled encodings"
                .into(),
        })
    }
}

/// Encodes an affine point `(x, y)` on a field of prime order `p` using the
/// given encoding. Curve-agnostic: encoding never needs `a`/`b`/`d`, unlike
/// compressed [`decode`], so this works for both [`CurveW`] and
/// [`crate::curve::CurveE`] points — callers pass `curve.p()`.
pub fn encode(p: &BigUint, x: &BigUint, y: &BigUint, encoding: Encoding) -> Vec<u8> {
    let raw = || {
        let mut out = number_to_string(x, p);
        out.extend(number_to_string(y, p));
        out
    };
    let y_is_odd = y % BigUint::from(2u32) == BigUint::one();
    match encoding {
        Encoding::Raw => raw(),
        Encoding::Uncompressed => {
            let mut out = vec![0x04];
            out.extend(raw());
            out
        }
        Encoding::Compressed => {
            let mut out = vec![if y_is_odd { 0x03 } else { 0x02 }];
            out.extend(number_to_string(x, p));
            out
        }
        Encoding::Hybrid => {
            let mut out = vec![if y_is_odd { 0x07 } else { 0x06 }];
            out.extend(raw());
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::CurveW;

    fn tiny_curve() -> CurveW {
        CurveW::new(BigUint::from(97u32), 2, 3, None)
    }

    #[test]
    fn encoding_parse_round_trips_known_names() {
        for name in ["raw", "uncompressed", "compressed", "hybrid"] {
            assert!(Encoding::parse(name).is_ok());
        }
    }

    #[test]
    fn encoding_parse_rejects_unknown_name() {
        assert_eq!(
            Encoding::parse("bogus"),
            Err(Error::InvalidEncodingName("bogus".into()))
        );
    }

    #[test]
    fn raw_round_trip() {
        let curve = tiny_curve();
        let x = BigUint::from(3u32);
        let y = BigUint::from(6u32);
        let bytes = encode(curve.p(), &x, &y, Encoding::Raw);
        let (x2, y2) = decode(&curve, &bytes, true, &ALL_ENCODINGS).unwrap();
        assert_eq!((x, y), (x2, y2));
    }

    #[test]
    fn all_four_encodings_agree() {
        let curve = tiny_curve();
        let x = BigUint::from(3u32);
        let y = BigUint::from(6u32);
        let mut results = vec![];
        for enc in ALL_ENCODINGS {
            let bytes = encode(curve.p(), &x, &y, enc);
            results.push(decode(&curve, &bytes, true, &ALL_ENCODINGS).unwrap());
        }
        assert!(results.iter().all(|r| *r == (x.clone(), y.clone())));
    }

    #[test]
    fn compressed_tag_matches_parity() {
        let curve = tiny_curve();
        let x = BigUint::from(3u32);
        let y = BigUint::from(6u32); // even
        let bytes = encode(curve.p(), &x, &y, Encoding::Compressed);
        assert_eq!(bytes[0], 0x02);
    }

    #[test]
    fn hybrid_rejected_when_tag_disagrees_with_parity_and_validated() {
        let curve = tiny_curve();
        let x = BigUint::from(3u32);
        let y = BigUint::from(6u32); // even -> correct tag is 0x06
        let mut bytes = encode(curve.p(), &x, &y, Encoding::Hybrid);
        bytes[0] = 0x07; // wrong tag
        assert!(decode(&curve, &bytes, true, &ALL_ENCODINGS).is_err());
        assert!(decode(&curve, &bytes, false, &ALL_ENCODINGS).is_ok());
    }

    #[test]
    fn wrong_length_is_malformed() {
        let curve = tiny_curve();
        let bytes = vec![0u8; 3];
        assert!(matches!(
            decode(&curve, &bytes, true, &ALL_ENCODINGS),
            Err(Error::MalformedPoint { .. })
        ));
    }

    #[test]
    fn compressed_of_non_residue_is_malformed() {
        let curve = tiny_curve();
        // x = 0 -> alpha = b = 3, which has no square root mod 97 (check by brute force).
        let p = 97u32;
        let has_root = (0..p).any(|y| (y * y) % p == 3);
        assert!(!has_root, "test assumption: 3 is a non-residue mod 97");
        let bytes = [vec![0x02], number_to_string(&BigUint::from(0u32), curve.p())].concat();
        assert!(matches!(
            decode(&curve, &bytes, true, &ALL_ENCODINGS),
            Err(Error::MalformedPoint { .. })
        ));
    }
}
