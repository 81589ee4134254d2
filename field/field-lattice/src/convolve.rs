//! Gaussian smoothing via normalized kernel convolution.

#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

use crate::error::{LatticeError, LatticeResult};
use crate::lattice::Lattice;

/// A normalized square Gaussian kernel.
///
/// The kernel radius is `ceil(3 * sigma)` with a minimum of 1, so the
/// support covers three standard deviations. Weights sum to 1, which keeps
/// constant regions unchanged under convolution.
///
/// # Example
///
/// ```
/// use field_lattice::{GaussianKernel, Lattice};
///
/// let kernel = GaussianKernel::new(1.0).unwrap();
/// assert_eq!(kernel.radius(), 3);
///
/// let flat = Lattice::constant(8, 0.4).unwrap();
/// let smoothed = kernel.apply(&flat);
/// assert!((smoothed.get(4, 4).unwrap() - 0.4).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct GaussianKernel {
    radius: usize,
    // (2 * radius + 1)^2 weights, row-major
    weights: Vec<f64>,
}

impl GaussianKernel {
    /// Build a kernel for the given standard deviation.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::InvalidSigma`] if `sigma` is not positive
    /// and finite.
    pub fn new(sigma: f64) -> LatticeResult<Self> {
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(LatticeError::InvalidSigma(sigma));
        }

        let radius = ((3.0 * sigma).ceil() as usize).max(1);
        let side = 2 * radius + 1;
        let inv_two_sigma_sq = 1.0 / (2.0 * sigma * sigma);

        let mut weights = Vec::with_capacity(side * side);
        let mut sum = 0.0;
        for j in -(radius as i64)..=(radius as i64) {
            for i in -(radius as i64)..=(radius as i64) {
                let d_sq = (i * i + j * j) as f64;
                let w = (-d_sq * inv_two_sigma_sq).exp();
                weights.push(w);
                sum += w;
            }
        }
        for w in &mut weights {
            *w /= sum;
        }

        Ok(Self { radius, weights })
    }

    /// Kernel radius in cells.
    #[must_use]
    pub const fn radius(&self) -> usize {
        self.radius
    }

    /// Convolve the kernel with a lattice, producing a smoothed lattice.
    ///
    /// Border cells replicate the nearest edge value rather than reading
    /// zeros; zero padding would darken the image border, which is the wrong
    /// default for boundary detection near frame edges.
    #[must_use]
    pub fn apply(&self, lattice: &Lattice) -> Lattice {
        let size = lattice.size();
        let r = self.radius as i64;
        let side = 2 * self.radius + 1;

        let mut out = Vec::with_capacity(size * size);
        for y in 0..size as i64 {
            for x in 0..size as i64 {
                let mut acc = 0.0;
                for j in -r..=r {
                    let row = &self.weights[((j + r) as usize) * side..];
                    for i in -r..=r {
                        let w = row[(i + r) as usize];
                        acc = w.mul_add(lattice.get_clamped(x + i, y + j), acc);
                    }
                }
                out.push(acc);
            }
        }

        Lattice::from_raw(size, out)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rejects_non_positive_sigma() {
        assert!(matches!(
            GaussianKernel::new(0.0),
            Err(LatticeError::InvalidSigma(_))
        ));
        assert!(matches!(
            GaussianKernel::new(-1.5),
            Err(LatticeError::InvalidSigma(_))
        ));
        assert!(GaussianKernel::new(f64::NAN).is_err());
    }

    #[test]
    fn test_minimum_radius() {
        // Tiny sigma still yields a usable 3x3 kernel
        let kernel = GaussianKernel::new(0.1).unwrap();
        assert_eq!(kernel.radius(), 1);
    }

    #[test]
    fn test_weights_are_normalized() {
        let kernel = GaussianKernel::new(1.7).unwrap();
        let sum: f64 = kernel.weights.iter().sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_lattice_unchanged() {
        let flat = Lattice::constant(16, 0.6).unwrap();
        let smoothed = GaussianKernel::new(2.0).unwrap().apply(&flat);
        for y in 0..16 {
            for x in 0..16 {
                assert_relative_eq!(smoothed.get(x, y).unwrap(), 0.6, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_impulse_spreads_symmetrically() {
        let mut lattice = Lattice::new(9).unwrap();
        lattice.set(4, 4, 1.0).unwrap();
        let smoothed = GaussianKernel::new(1.0).unwrap().apply(&lattice);

        let center = smoothed.get(4, 4).unwrap();
        assert!(center > 0.0 && center < 1.0);
        assert_relative_eq!(
            smoothed.get(3, 4).unwrap(),
            smoothed.get(5, 4).unwrap(),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            smoothed.get(4, 3).unwrap(),
            smoothed.get(4, 5).unwrap(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_border_replication_keeps_edge_bright() {
        // A fully bright lattice must stay bright at the corners; zero
        // padding would pull them down.
        let bright = Lattice::constant(8, 1.0).unwrap();
        let smoothed = GaussianKernel::new(1.5).unwrap().apply(&bright);
        assert_relative_eq!(smoothed.get(0, 0).unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(smoothed.get(7, 7).unwrap(), 1.0, epsilon = 1e-12);
    }
}
