//! Error types raised while configuring the ranker.
#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors raised when a [`RankerConfig`](crate::RankerConfig) is unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankerConfigError {
    /// A weight was negative, NaN or infinite.
    #[error("rank weight {name} must be finite and non-negative")]
    InvalidWeight {
        /// Name of the offending weight.
        name: &'static str,
    },
    /// The reference point was not a valid WGS84 coordinate.
    #[error("reference point must lie within longitude -180..=180 and latitude -90..=90")]
    InvalidReference,
    /// The result cap was zero.
    #[error("maximum result count must be at least one")]
    ZeroCap,
}
