//! Streamline integration along iso-intensity tangents.
//!
//! A streamline starts at a seed, follows the direction tangent to the
//! gradient (the gradient rotated 90 degrees, so the curve rides along the
//! boundary instead of crossing it), and ends in one of two terminal
//! states: `Closed` when it returns near its own seed, or `Open` otherwise.

#![allow(clippy::cast_precision_loss)]

use field_lattice::GradientField;
use nalgebra::{Point2, Vector2};

use crate::params::TraceParams;

/// Fraction of the step budget during which the closure test is suppressed,
/// so a seed cannot trivially close against itself at step 0.
const CLOSURE_WARMUP_DIVISOR: usize = 10;

/// Displacement below which a step counts as stalled in a flat region.
const STALL_EPSILON: f64 = 1e-12;

/// Why an open streamline terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenReason {
    /// The integration budget ran out.
    MaxSteps,
    /// The trace left the lattice bounds.
    LeftBounds,
    /// Gradient magnitude fell below the configured floor; the tangent is
    /// undefined there.
    FlatRegion,
    /// Integration produced a non-finite coordinate. The streamline is
    /// abandoned; the pass continues.
    Diverged,
}

/// Terminal state of one traced streamline.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceOutcome {
    /// The trace returned within the closure threshold of its seed. The
    /// closing point is included.
    Closed {
        /// Ordered trace points, seed first.
        points: Vec<Point2<f64>>,
        /// Final distance to the seed.
        closure_distance: f64,
    },
    /// The trace terminated without closing and is discarded before
    /// validation.
    Open {
        /// Ordered trace points, seed first.
        points: Vec<Point2<f64>>,
        /// What ended the trace.
        reason: OpenReason,
    },
}

impl TraceOutcome {
    /// Whether this trace closed on its seed.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed { .. })
    }

    /// The trace points regardless of outcome.
    #[must_use]
    pub fn points(&self) -> &[Point2<f64>] {
        match self {
            Self::Closed { points, .. } | Self::Open { points, .. } => points,
        }
    }
}

/// Evaluate the iso-contour tangent at a continuous point.
///
/// Returns the zero vector where the gradient magnitude is below `floor`.
/// When `hint` is non-zero the tangent is sign-aligned with it to avoid
/// 180-degree flips between consecutive evaluations.
fn tangent(
    field: &GradientField,
    p: Point2<f64>,
    hint: Vector2<f64>,
    floor: f64,
) -> Vector2<f64> {
    let g = field.sample(p.x, p.y);
    let t = Vector2::new(-g.y, g.x);
    let norm = t.norm();
    if norm < floor {
        return Vector2::zeros();
    }
    let t = t / norm;
    if hint != Vector2::zeros() && t.dot(&hint) < 0.0 {
        -t
    } else {
        t
    }
}

/// Pluggable fixed-step integration scheme over the tangent field.
///
/// The default is [`Rk4`]; [`Euler`] is the cheap alternate for callers
/// that trade accuracy for speed.
pub trait IntegrationScheme {
    /// Displacement for one step of size `h` starting at `pos`.
    fn displacement(
        &self,
        field: &GradientField,
        pos: Point2<f64>,
        hint: Vector2<f64>,
        h: f64,
        floor: f64,
    ) -> Vector2<f64>;
}

/// Classic fixed-step 4th-order Runge-Kutta.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rk4;

impl IntegrationScheme for Rk4 {
    fn displacement(
        &self,
        field: &GradientField,
        pos: Point2<f64>,
        hint: Vector2<f64>,
        h: f64,
        floor: f64,
    ) -> Vector2<f64> {
        let k1 = tangent(field, pos, hint, floor);
        let k2 = tangent(field, pos + k1 * (h * 0.5), k1, floor);
        let k3 = tangent(field, pos + k2 * (h * 0.5), k1, floor);
        let k4 = tangent(field, pos + k3 * h, k1, floor);
        (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (h / 6.0)
    }
}

/// Forward Euler, one tangent evaluation per step.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euler;

impl IntegrationScheme for Euler {
    fn displacement(
        &self,
        field: &GradientField,
        pos: Point2<f64>,
        hint: Vector2<f64>,
        h: f64,
        floor: f64,
    ) -> Vector2<f64> {
        tangent(field, pos, hint, floor) * h
    }
}

/// Traces streamlines through a gradient field.
///
/// Holds the per-pass configuration; one tracer serves every seed of a
/// pass. Per-step termination checks run in priority order: step budget,
/// lattice bounds, flat region, closure.
pub struct StreamlineTracer<'a> {
    field: &'a GradientField,
    scheme: &'a dyn IntegrationScheme,
    step_size: f64,
    max_steps: usize,
    closure_threshold: f64,
    magnitude_floor: f64,
    warmup: usize,
}

impl<'a> StreamlineTracer<'a> {
    /// Create a tracer over a gradient field with the given scheme and
    /// parameters. Assumes `params` already validated.
    #[must_use]
    pub fn new(
        field: &'a GradientField,
        scheme: &'a dyn IntegrationScheme,
        params: &TraceParams,
    ) -> Self {
        Self {
            field,
            scheme,
            step_size: params.step_size,
            max_steps: params.max_steps,
            closure_threshold: params.closure_threshold,
            magnitude_floor: params.magnitude_floor,
            warmup: (params.max_steps / CLOSURE_WARMUP_DIVISOR).max(4),
        }
    }

    /// Steps suppressed before the closure test is allowed to fire.
    #[must_use]
    pub const fn warmup(&self) -> usize {
        self.warmup
    }

    /// Trace one streamline forward from a seed.
    ///
    /// Executes at most `max_steps` integration steps.
    #[must_use]
    pub fn trace(&self, seed: Point2<f64>) -> TraceOutcome {
        let max = (self.field.size() - 1) as f64;
        let mut points = Vec::with_capacity(self.max_steps.min(1024) + 1);
        let mut pos = seed;
        let mut hint = Vector2::zeros();
        points.push(pos);

        let mut steps = 0;
        loop {
            if steps >= self.max_steps {
                return TraceOutcome::Open {
                    points,
                    reason: OpenReason::MaxSteps,
                };
            }
            if pos.x < 0.0 || pos.x > max || pos.y < 0.0 || pos.y > max {
                return TraceOutcome::Open {
                    points,
                    reason: OpenReason::LeftBounds,
                };
            }
            if self.field.sample(pos.x, pos.y).norm() < self.magnitude_floor {
                return TraceOutcome::Open {
                    points,
                    reason: OpenReason::FlatRegion,
                };
            }
            if steps >= self.warmup {
                let closure_distance = (pos - seed).norm();
                if closure_distance <= self.closure_threshold {
                    return TraceOutcome::Closed {
                        points,
                        closure_distance,
                    };
                }
            }

            let disp = self.scheme.displacement(
                self.field,
                pos,
                hint,
                self.step_size,
                self.magnitude_floor,
            );
            let disp_norm = disp.norm();
            if !disp_norm.is_finite() {
                return TraceOutcome::Open {
                    points,
                    reason: OpenReason::Diverged,
                };
            }
            if disp_norm < STALL_EPSILON {
                // A substep landed in a flat pocket; nothing left to follow
                return TraceOutcome::Open {
                    points,
                    reason: OpenReason::FlatRegion,
                };
            }

            hint = disp / disp_norm;
            pos += disp;
            points.push(pos);
            steps += 1;
        }
    }
}
