//! Elliptic-curve point arithmetic core for an ECDSA/EdDSA library.
//!
//! This crate is the hard inner layer of a signature library: curve domain
//! parameters, the X9.62/SEC1 point codecs, and the scalar-multiplication
//! engines that everything else — key generation, signing, verification —
//! is built on top of. It does not implement ECDSA or EdDSA itself; it
//! provides the group arithmetic those protocols consume.
//!
//! # Module overview
//!
//! - [`curve`]
//!   Immutable domain parameters for short-Weierstrass ([`curve::CurveW`])
//!   and twisted-Edwards ([`curve::CurveE`]) curves, plus the on-curve
//!   predicate each carries. [`curve::presets`] has ready-made parameter
//!   sets for NIST P-256, secp256k1, and Ed25519.
//!
//! - [`point`]
//!   The point types: [`point::JacobiPoint`] (short-Weierstrass, Jacobian
//!   coordinates — the workhorse, with NAF scalar multiplication,
//!   generator precomputation, and the dual `mul_add` used by signature
//!   verification), [`point::AffinePoint`] (classical affine, X9.62 B.3),
//!   [`point::EdwardsPoint`] (twisted-Edwards, extended coordinates), and
//!   [`point::codec`] (the four wire encodings; decoding is
//!   short-Weierstrass-only, but encoding raw/uncompressed/hybrid is
//!   curve-agnostic and shared with [`point::EdwardsPoint::to_bytes`]).
//!
//! - [`numeric`]
//!   Number-theory helpers used throughout the crate — modular inverse,
//!   modular square root, big-endian integer codecs — implemented on top
//!   of [`num_bigint`].
//!
//! - [`error`]
//!   The crate's error taxonomy: malformed point encodings, unsupported
//!   encoding names, and cross-curve operations.
//!
//! # What this crate deliberately does not do
//!
//! Side-channel hardening. Every formula here is the value-branchy,
//! timing-variable one from the explicit-formulas database, not a
//! constant-time rewrite — callers needing constant-time behavior need a
//! different design. The one exception is the scalar reduction scheme:
//! `k mod 2·order` rather than `k mod order` is kept even here, because it
//! is a correctness property (fixed representation width defeats the
//! Minerva class of attacks that recover the top bit of an unreduced
//! scalar via timing) and not a full constant-time guarantee.

mod modmath;

pub mod curve;
pub mod error;
pub mod numeric;
pub mod point;

pub use curve::{CurveE, CurveW};
pub use error::Error;
pub use point::{AffinePoint, EdwardsPoint, JacobiPoint};
