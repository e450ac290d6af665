//! Disruption error types.

use crate::domain::InvalidId;

/// Errors from disruption operations.
///
/// A failed operation leaves the overlay unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DisruptionError {
    /// Delay factor is negative, NaN or infinite
    #[error("invalid delay factor {0}: must be a finite number >= 0")]
    InvalidDelayFactor(f64),

    /// Delay factor would push a connection past the largest representable
    /// travel time
    #[error("delay factor {factor} is too large: a {longest}s connection would exceed {max}s", max = u32::MAX)]
    DelayOverflow { factor: f64, longest: u32 },

    /// Station or line name is blank
    #[error(transparent)]
    InvalidId(#[from] InvalidId),
}
