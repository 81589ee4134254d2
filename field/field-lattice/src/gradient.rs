//! Gradient field computation via 3x3 derivative kernels.

#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

use nalgebra::Vector2;

use crate::error::{LatticeError, LatticeResult};
use crate::lattice::Lattice;

type Kernel3 = [[f64; 3]; 3];

const SOBEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

const SCHARR_X: Kernel3 = [[-3.0, 0.0, 3.0], [-10.0, 0.0, 10.0], [-3.0, 0.0, 3.0]];
const SCHARR_Y: Kernel3 = [[-3.0, -10.0, -3.0], [0.0, 0.0, 0.0], [3.0, 10.0, 3.0]];

/// Derivative vector and magnitude for one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientSample {
    /// Horizontal derivative.
    pub dx: f64,
    /// Vertical derivative.
    pub dy: f64,
    /// `sqrt(dx^2 + dy^2)`.
    pub magnitude: f64,
}

/// Per-cell gradient data derived from a [`Lattice`].
///
/// Read-only once computed; recomputed from the current smoothed lattice on
/// every pass. The `(dx, dy)` vector supports the same clamped bilinear
/// sampling contract as the lattice itself, which is what streamline
/// integration consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientField {
    size: usize,
    dx: Vec<f64>,
    dy: Vec<f64>,
    magnitude: Vec<f64>,
}

impl GradientField {
    /// Side length of the underlying lattice.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Read one cell by integer coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::IndexOutOfBounds`] if either coordinate is
    /// outside the field.
    pub fn get(&self, x: usize, y: usize) -> LatticeResult<GradientSample> {
        if x >= self.size || y >= self.size {
            return Err(LatticeError::IndexOutOfBounds {
                x,
                y,
                size: self.size,
            });
        }
        let idx = y * self.size + x;
        Ok(GradientSample {
            dx: self.dx[idx],
            dy: self.dy[idx],
            magnitude: self.magnitude[idx],
        })
    }

    /// Per-cell magnitudes in row-major order.
    #[must_use]
    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitude
    }

    /// Sample the `(dx, dy)` vector at continuous coordinates.
    ///
    /// Bilinear interpolation with component-wise clamping, matching
    /// [`Lattice::sample`].
    #[must_use]
    pub fn sample(&self, x: f64, y: f64) -> Vector2<f64> {
        let max = (self.size - 1) as f64;
        let x = x.clamp(0.0, max);
        let y = y.clamp(0.0, max);

        let x0 = x.floor() as usize;
        let y0 = y.floor() as usize;
        let x1 = (x0 + 1).min(self.size - 1);
        let y1 = (y0 + 1).min(self.size - 1);

        let fx = x - x0 as f64;
        let fy = y - y0 as f64;

        let lerp2 = |buf: &[f64]| {
            let v00 = buf[y0 * self.size + x0];
            let v10 = buf[y0 * self.size + x1];
            let v01 = buf[y1 * self.size + x0];
            let v11 = buf[y1 * self.size + x1];
            let top = fx.mul_add(v10 - v00, v00);
            let bottom = fx.mul_add(v11 - v01, v01);
            fy.mul_add(bottom - top, top)
        };

        Vector2::new(lerp2(&self.dx), lerp2(&self.dy))
    }

    fn from_kernels(lattice: &Lattice, kx: &Kernel3, ky: &Kernel3) -> Self {
        let size = lattice.size();
        let mut dx = Vec::with_capacity(size * size);
        let mut dy = Vec::with_capacity(size * size);
        let mut magnitude = Vec::with_capacity(size * size);

        for y in 0..size as i64 {
            for x in 0..size as i64 {
                let mut sum_x = 0.0;
                let mut sum_y = 0.0;
                for j in 0..3 {
                    for i in 0..3 {
                        // Borders replicate edge cells, same as convolution
                        let v = lattice.get_clamped(x + i - 1, y + j - 1);
                        sum_x = kx[j as usize][i as usize].mul_add(v, sum_x);
                        sum_y = ky[j as usize][i as usize].mul_add(v, sum_y);
                    }
                }
                dx.push(sum_x);
                dy.push(sum_y);
                magnitude.push(sum_x.hypot(sum_y));
            }
        }

        Self {
            size,
            dx,
            dy,
            magnitude,
        }
    }
}

/// Pluggable derivative operator over a lattice.
///
/// The default strategy is [`Sobel`]; [`Scharr`] trades a little isotropy
/// error for rotational accuracy. Callers substitute alternates without any
/// conditional wiring inside the pipeline.
pub trait GradientStrategy {
    /// Compute the gradient field of a lattice.
    fn compute(&self, lattice: &Lattice) -> GradientField;
}

/// The standard 3x3 Sobel derivative kernels.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sobel;

impl GradientStrategy for Sobel {
    fn compute(&self, lattice: &Lattice) -> GradientField {
        GradientField::from_kernels(lattice, &SOBEL_X, &SOBEL_Y)
    }
}

/// The 3x3 Scharr derivative kernels (better rotational symmetry).
#[derive(Debug, Clone, Copy, Default)]
pub struct Scharr;

impl GradientStrategy for Scharr {
    fn compute(&self, lattice: &Lattice) -> GradientField {
        GradientField::from_kernels(lattice, &SCHARR_X, &SCHARR_Y)
    }
}
