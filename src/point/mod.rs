//! Point representations and their byte encodings.
//!
//! Three point types, each suited to a different job:
//!
//! - [`JacobiPoint`] — short-Weierstrass points in Jacobian coordinates,
//!   the workhorse for scalar multiplication (NAF ladder, generator
//!   precomputation, dual `mul_add`).
//! - [`AffinePoint`] — short-Weierstrass points in classical affine
//!   coordinates, used for the X9.62 B.3 reference arithmetic and as the
//!   landing representation for [`JacobiPoint::to_affine`].
//! - [`EdwardsPoint`] — twisted-Edwards points in extended coordinates.
//!
//! All three curve-carrying points hold their curve behind an `Arc` rather
//! than a bare reference or an owned value: points routinely outlive the
//! expression that built them (stored in a table, returned from a
//! function, moved across threads via the generator precomputation
//! machinery), so a borrow wouldn't satisfy the borrow checker without
//! forcing a lifetime parameter onto every point type, and cloning the
//! curve's `BigUint` fields on every point construction would be wasteful
//! given how many points share the same curve over a scalar
//! multiplication. `Arc` gives cheap, shared, `'static` ownership instead.
//!
//! [`codec`] implements the four X9.62/SEC1 octet-string encodings shared
//! by [`JacobiPoint`] and [`AffinePoint`].

pub mod codec;

mod affine;
mod edwards;
mod jacobi;

pub use affine::AffinePoint;
pub use codec::Encoding;
pub use edwards::EdwardsPoint;
pub use jacobi::JacobiPoint;
