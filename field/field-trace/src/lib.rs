//! Boundary extraction from luminance lattices.
//!
//! Converts a raster intensity field into closed vector boundary curves:
//! Gaussian smoothing, Sobel gradients, seeded streamline tracing along
//! iso-intensity tangents, closed-loop validation, and path building.
//!
//! # Pipeline
//!
//! - [`extract_boundaries`] - One synchronous pass: lattice in,
//!   [`BoundarySet`] out
//! - [`TraceParams`] - Per-pass configuration with presets and builders
//! - [`FrameDriver`] / [`BoundarySink`] - Per-frame orchestration against a
//!   render collaborator
//!
//! # Components
//!
//! - [`SeedGenerator`] - Deterministic jittered-grid seeding
//! - [`StreamlineTracer`] - Fixed-step integration with bounded work and
//!   closure detection ([`Rk4`] default, [`Euler`] alternate)
//! - [`LoopValidator`] / [`deduplicate`] - Noise and duplicate filtering
//! - [`build_path`] / [`export_svg`] - Loop-to-path conversion
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
//! use field_trace::{extract_boundaries, Lattice, TraceParams};
//!
//! // A bright disk on a dark background
//! let lattice = Lattice::from_fn(48, |x, y| {
//!     let d = (x as f64 - 23.5).hypot(y as f64 - 23.5);
//!     if d < 12.0 { 1.0 } else { 0.0 }
//! })
//! .unwrap();
//!
//! let params = TraceParams::default().with_rng_seed(7);
//! let set = extract_boundaries(&lattice, &params).unwrap();
//! for lp in &set.loops {
//!     println!("loop with {} points, perimeter {:.1}", lp.point_count(), lp.perimeter);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod integrate;
mod loops;
mod orchestrator;
mod params;
mod path;
mod pipeline;
mod result;
mod seed;

pub use error::{TraceError, TraceResult};
pub use integrate::{Euler, IntegrationScheme, OpenReason, Rk4, StreamlineTracer, TraceOutcome};
pub use loops::{deduplicate, BoundaryLoop, LoopValidator};
pub use orchestrator::{BoundarySink, FrameDisposition, FrameDriver};
pub use params::{StrokeStyle, TraceParams};
pub use path::{build_path, export_svg, to_svg_path_data, PathCommand, SvgExportParams};
pub use pipeline::{extract_boundaries, extract_boundaries_with};
pub use result::{BoundarySet, PassStats};
pub use seed::SeedGenerator;

// Re-export the lattice layer and math types for convenience
pub use field_lattice::{
    GaussianKernel, GradientField, GradientSample, GradientStrategy, Lattice, LatticeError,
    Scharr, Sobel,
};
pub use nalgebra::{Point2, Vector2};
