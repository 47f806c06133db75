//! Error taxonomy for the elliptic-curve core.
//!
//! Decode failures and cross-curve operations return [`Error`]; coordinates
//! that fail the on-curve predicate or the subgroup-order check are
//! programmer errors and panic instead.

use thiserror::Error;

/// Errors produced while decoding or combining points.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The byte encoding of a point is invalid: bad tag, length matching no
    /// enabled encoding, failed compressed decompression, or a hybrid tag
    /// that disagrees with the computed y-parity under validation.
    #[error("malformed point encoding: {reason}")]
    MalformedPoint {
        /// Human-readable explanation of what failed.
        reason: String,
    },

    /// A caller passed an encoding name outside
    /// `{raw, uncompressed, compressed, hybrid}`.
    #[error("unsupported point encoding: {0}")]
    InvalidEncodingName(String),

    /// `+` or `mul_add` was asked to combine points from different curves.
    #[error("points belong to different curves")]
    CurveMismatch,
}
