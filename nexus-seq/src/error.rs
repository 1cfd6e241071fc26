//! Error types for sequence operations.

use thiserror::Error;

/// An index fell outside the valid range of the sequence.
///
/// Returned by every index-based operation. The sequence is left
/// unmodified when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("index {index} out of range for sequence of length {len}")]
pub struct OutOfBounds {
    /// The rejected index.
    pub index: usize,
    /// Length of the sequence at the time of the call.
    pub len: usize,
}

/// A list was configured with a bucket capacity of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("bucket capacity must be at least 1, got {0}")]
pub struct InvalidCapacity(pub usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = OutOfBounds { index: 9, len: 3 };
        assert_eq!(
            err.to_string(),
            "index 9 out of range for sequence of length 3"
        );
        assert_eq!(
            InvalidCapacity(0).to_string(),
            "bucket capacity must be at least 1, got 0"
        );
    }
}
