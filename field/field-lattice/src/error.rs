//! Error types for lattice operations.

use thiserror::Error;

/// Errors that can occur in lattice operations.
#[derive(Debug, Error)]
pub enum LatticeError {
    /// Lattice side length must be at least 1.
    #[error("invalid lattice size: {0} (must be >= 1)")]
    InvalidSize(usize),

    /// Sample buffer does not match the declared side length.
    #[error("sample count mismatch: got {actual}, expected {expected} for size {size}")]
    SampleCountMismatch {
        /// Declared side length.
        size: usize,
        /// Expected sample count (`size * size`).
        expected: usize,
        /// Provided sample count.
        actual: usize,
    },

    /// Integer cell access outside the lattice bounds.
    #[error("index out of bounds: ({x}, {y}) not in {size}x{size} lattice")]
    IndexOutOfBounds {
        /// Requested column.
        x: usize,
        /// Requested row.
        y: usize,
        /// Lattice side length.
        size: usize,
    },

    /// Gaussian sigma must be positive and finite.
    #[error("invalid sigma: {0} (must be > 0 and finite)")]
    InvalidSigma(f64),
}

/// Result type for lattice operations.
pub type LatticeResult<T> = std::result::Result<T, LatticeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LatticeError::IndexOutOfBounds { x: 9, y: 3, size: 8 };
        assert_eq!(format!("{err}"), "index out of bounds: (9, 3) not in 8x8 lattice");

        let err = LatticeError::InvalidSigma(-0.5);
        assert!(format!("{err}").contains("-0.5"));
    }
}
