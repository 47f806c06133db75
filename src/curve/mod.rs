//! Curve domain parameters.
//!
//! This module carries only immutable domain parameters and the on-curve
//! predicate for each of the two curve families the crate supports. Curves
//! are constructed once, never mutated, and shared between points via
//! [`std::sync::Arc`] — see the module docs of [`crate::point`] for why
//! `Arc` rather than a bare reference.

mod edwards;
mod weierstrass;

pub mod presets;

pub use edwards::CurveE;
pub use weierstrass::CurveW;
