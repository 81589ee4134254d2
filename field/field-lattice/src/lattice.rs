//! Square scalar grid with continuous-coordinate sampling.

// Lattice sizes are small enough that usize -> f64 is exact
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use crate::error::{LatticeError, LatticeResult};

/// A fixed-size square grid of scalar samples in row-major order.
///
/// Samples conventionally live in `[0, 1]` (luminance), though the lattice
/// itself does not enforce a range. The side length is fixed for the
/// lifetime of the lattice.
///
/// # Example
///
/// ```
/// use field_lattice::Lattice;
///
/// let mut lattice = Lattice::new(8).unwrap();
/// lattice.set(3, 4, 0.5).unwrap();
/// assert!((lattice.get(3, 4).unwrap() - 0.5).abs() < 1e-12);
///
/// // Continuous sampling interpolates between cells
/// let v = lattice.sample(3.0, 4.5);
/// assert!((v - 0.25).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    size: usize,
    samples: Vec<f64>,
}

impl Lattice {
    /// Create a zero-filled lattice with the given side length.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::InvalidSize`] if `size` is 0.
    pub fn new(size: usize) -> LatticeResult<Self> {
        Self::constant(size, 0.0)
    }

    /// Create a lattice filled with a constant value.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::InvalidSize`] if `size` is 0.
    pub fn constant(size: usize, value: f64) -> LatticeResult<Self> {
        if size == 0 {
            return Err(LatticeError::InvalidSize(size));
        }
        Ok(Self {
            size,
            samples: vec![value; size * size],
        })
    }

    /// Create a lattice from an existing row-major sample buffer.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::InvalidSize`] if `size` is 0, or
    /// [`LatticeError::SampleCountMismatch`] if the buffer length is not
    /// `size * size`.
    pub fn from_samples(size: usize, samples: Vec<f64>) -> LatticeResult<Self> {
        if size == 0 {
            return Err(LatticeError::InvalidSize(size));
        }
        let expected = size * size;
        if samples.len() != expected {
            return Err(LatticeError::SampleCountMismatch {
                size,
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self { size, samples })
    }

    /// Create a lattice by evaluating a function at every cell.
    ///
    /// The function receives `(x, y)` cell coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::InvalidSize`] if `size` is 0.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> f64) -> LatticeResult<Self> {
        if size == 0 {
            return Err(LatticeError::InvalidSize(size));
        }
        let mut samples = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                samples.push(f(x, y));
            }
        }
        Ok(Self { size, samples })
    }

    /// Construct from a buffer already known to match the size.
    pub(crate) fn from_raw(size: usize, samples: Vec<f64>) -> Self {
        debug_assert_eq!(samples.len(), size * size);
        Self { size, samples }
    }

    /// Side length of the lattice.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// The raw row-major sample buffer.
    #[must_use]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Read a cell by integer coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::IndexOutOfBounds`] if either coordinate is
    /// outside the lattice.
    pub fn get(&self, x: usize, y: usize) -> LatticeResult<f64> {
        self.check_bounds(x, y)?;
        Ok(self.samples[y * self.size + x])
    }

    /// Write a cell by integer coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::IndexOutOfBounds`] if either coordinate is
    /// outside the lattice.
    pub fn set(&mut self, x: usize, y: usize, value: f64) -> LatticeResult<()> {
        self.check_bounds(x, y)?;
        self.samples[y * self.size + x] = value;
        Ok(())
    }

    /// Read a cell with coordinates clamped to the lattice bounds.
    ///
    /// Out-of-range coordinates replicate the nearest edge cell. Used by
    /// convolution and gradient borders.
    #[must_use]
    pub fn get_clamped(&self, x: i64, y: i64) -> f64 {
        let max = self.size as i64 - 1;
        let cx = x.clamp(0, max) as usize;
        let cy = y.clamp(0, max) as usize;
        self.samples[cy * self.size + cx]
    }

    /// Sample the lattice at continuous coordinates.
    ///
    /// Bilinear interpolation between the four nearest cells. Coordinates
    /// outside `[0, size - 1]` are clamped component-wise before
    /// interpolation; there is no wraparound and no error path.
    #[must_use]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let max = (self.size - 1) as f64;
        let x = x.clamp(0.0, max);
        let y = y.clamp(0.0, max);

        let x0 = x.floor() as usize;
        let y0 = y.floor() as usize;
        let x1 = (x0 + 1).min(self.size - 1);
        let y1 = (y0 + 1).min(self.size - 1);

        let fx = x - x0 as f64;
        let fy = y - y0 as f64;

        let v00 = self.samples[y0 * self.size + x0];
        let v10 = self.samples[y0 * self.size + x1];
        let v01 = self.samples[y1 * self.size + x0];
        let v11 = self.samples[y1 * self.size + x1];

        let top = fx.mul_add(v10 - v00, v00);
        let bottom = fx.mul_add(v11 - v01, v01);
        fy.mul_add(bottom - top, top)
    }

    fn check_bounds(&self, x: usize, y: usize) -> LatticeResult<()> {
        if x >= self.size || y >= self.size {
            return Err(LatticeError::IndexOutOfBounds {
                x,
                y,
                size: self.size,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_zero_size() {
        assert!(matches!(Lattice::new(0), Err(LatticeError::InvalidSize(0))));
    }

    #[test]
    fn test_from_samples_mismatch() {
        let result = Lattice::from_samples(3, vec![0.0; 8]);
        assert!(matches!(
            result,
            Err(LatticeError::SampleCountMismatch {
                size: 3,
                expected: 9,
                actual: 8
            })
        ));
    }

    #[test]
    fn test_get_set_roundtrip() {
        let mut lattice = Lattice::new(4).unwrap();
        lattice.set(2, 3, 0.75).unwrap();
        assert_relative_eq!(lattice.get(2, 3).unwrap(), 0.75);
    }

    #[test]
    fn test_integer_access_out_of_bounds() {
        let mut lattice = Lattice::new(4).unwrap();
        assert!(matches!(
            lattice.get(4, 0),
            Err(LatticeError::IndexOutOfBounds { x: 4, y: 0, size: 4 })
        ));
        assert!(lattice.set(0, 4, 1.0).is_err());
    }

    #[test]
    fn test_sample_at_cell_centers() {
        let lattice = Lattice::from_fn(4, |x, y| (y * 4 + x) as f64 / 16.0).unwrap();
        // Exact at integer coordinates
        assert_relative_eq!(lattice.sample(2.0, 1.0), lattice.get(2, 1).unwrap());
    }

    #[test]
    fn test_sample_midpoint() {
        let mut lattice = Lattice::new(2).unwrap();
        lattice.set(0, 0, 0.0).unwrap();
        lattice.set(1, 0, 1.0).unwrap();
        lattice.set(0, 1, 0.0).unwrap();
        lattice.set(1, 1, 1.0).unwrap();

        assert_relative_eq!(lattice.sample(0.5, 0.5), 0.5);
        assert_relative_eq!(lattice.sample(0.25, 0.0), 0.25);
    }

    #[test]
    fn test_sample_clamps_outside_bounds() {
        let lattice = Lattice::from_fn(4, |x, _| x as f64).unwrap();
        // Left of the lattice clamps to column 0, right clamps to column 3
        assert_relative_eq!(lattice.sample(-5.0, 1.5), 0.0);
        assert_relative_eq!(lattice.sample(100.0, 1.5), 3.0);
        assert_relative_eq!(lattice.sample(1.5, -2.0), 1.5);
    }

    #[test]
    fn test_get_clamped_replicates_edges() {
        let lattice = Lattice::from_fn(3, |x, y| (x + 10 * y) as f64).unwrap();
        assert_relative_eq!(lattice.get_clamped(-1, -1), 0.0);
        assert_relative_eq!(lattice.get_clamped(5, 1), 12.0);
    }
}
