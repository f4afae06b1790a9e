//! Error types for the label-propagation library

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the public entry points.
///
/// Only cheap structural checks are reported; per-edge validity (keys within
/// span, non-negative weights) is a caller precondition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Prior membership vector does not cover the graph's key space.
    #[error("membership length {found} does not match graph span {expected}")]
    MembershipLength {
        /// Graph span (expected length).
        expected: usize,
        /// Actual vector length.
        found: usize,
    },

    /// Tolerance outside the unit interval.
    #[error("tolerance {0} is outside [0, 1]")]
    InvalidTolerance(f32),

    /// Zero repetitions requested.
    #[error("repeat must be at least 1")]
    ZeroRepeat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::MembershipLength {
            expected: 8,
            found: 3,
        };
        assert_eq!(
            e.to_string(),
            "membership length 3 does not match graph span 8"
        );
        assert_eq!(
            Error::InvalidTolerance(1.5).to_string(),
            "tolerance 1.5 is outside [0, 1]"
        );
    }
}
