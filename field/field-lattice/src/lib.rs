//! Square scalar lattices for luminance field analysis.
//!
//! This crate provides the raster side of boundary extraction:
//!
//! # Lattice Storage
//!
//! - [`Lattice`] - Fixed-size square grid of scalar samples with clamped
//!   bilinear sampling at continuous coordinates
//!
//! # Smoothing
//!
//! - [`GaussianKernel`] - Normalized Gaussian convolution with
//!   edge-replicating borders
//!
//! # Gradients
//!
//! - [`GradientField`] - Per-cell derivative vectors and magnitudes
//! - [`GradientStrategy`] - Pluggable derivative operator
//! - [`Sobel`] / [`Scharr`] - 3x3 derivative kernel pairs
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero engine dependencies**. It can be used in:
//! - CLI tools
//! - Web applications (WASM)
//! - Servers
//! - Offline analysis pipelines
//!
//! # Example
//!
//! ```
//! use field_lattice::{GaussianKernel, GradientStrategy, Lattice, Sobel};
//!
//! // A vertical step edge
//! let lattice = Lattice::from_fn(16, |x, _y| if x < 8 { 0.0 } else { 1.0 }).unwrap();
//!
//! // Smooth, then differentiate
//! let kernel = GaussianKernel::new(1.0).unwrap();
//! let smoothed = kernel.apply(&lattice);
//! let field = Sobel.compute(&smoothed);
//!
//! // The edge shows up as gradient magnitude near x = 8
//! assert!(field.sample(7.5, 8.0).norm() > field.sample(1.0, 8.0).norm());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod convolve;
mod error;
mod gradient;
mod lattice;

pub use convolve::GaussianKernel;
pub use error::{LatticeError, LatticeResult};
pub use gradient::{GradientField, GradientSample, GradientStrategy, Scharr, Sobel};
pub use lattice::Lattice;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Vector2};
