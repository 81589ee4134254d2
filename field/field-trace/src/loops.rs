//! Closed-loop validation and deduplication.

#![allow(clippy::cast_precision_loss)]

use nalgebra::Point2;

/// Centroid distance (in lattice cells) under which two loops may be
/// duplicates.
const DUPLICATE_CENTROID_DISTANCE: f64 = 1.0;

/// Maximum relative point-count difference for two loops to count as
/// duplicates.
const DUPLICATE_COUNT_RATIO: f64 = 0.2;

/// A validated, closed, sufficiently long streamline.
///
/// Owned by the per-pass [`BoundarySet`](crate::BoundarySet); discarded at
/// the next frame.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryLoop {
    /// Ordered trace points, seed first, closing point last.
    pub points: Vec<Point2<f64>>,
    /// Distance between the final point and the seed.
    pub closure_distance: f64,
    /// Mean of the trace points.
    pub centroid: Point2<f64>,
    /// Closed-polygon perimeter, including the implicit closing segment.
    pub perimeter: f64,
    /// Signed shoelace area; counter-clockwise loops are positive.
    pub area: f64,
}

impl BoundaryLoop {
    /// Number of trace points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }
}

/// Filters closed traces into [`BoundaryLoop`]s.
#[derive(Debug, Clone, Copy)]
pub struct LoopValidator {
    min_loop_length: usize,
}

impl LoopValidator {
    /// Create a validator with the given minimum loop length.
    #[must_use]
    pub const fn new(min_loop_length: usize) -> Self {
        Self { min_loop_length }
    }

    /// Accept a closed trace if it is long enough.
    ///
    /// A trace with point count exactly equal to the minimum is accepted;
    /// anything shorter is rejected as noise (a seed curling straight back
    /// on itself).
    #[must_use]
    pub fn validate(
        &self,
        points: Vec<Point2<f64>>,
        closure_distance: f64,
    ) -> Option<BoundaryLoop> {
        if points.len() < self.min_loop_length {
            return None;
        }

        let centroid = centroid_of(&points);
        let (perimeter, area) = perimeter_and_area(&points);

        Some(BoundaryLoop {
            points,
            closure_distance,
            centroid,
            perimeter,
            area,
        })
    }
}

/// Drop loops that duplicate an earlier one.
///
/// Two loops are duplicates when their centroids lie within one lattice
/// cell and their point counts differ by less than 20% of the larger. The
/// first loop in seed order wins. Returns the survivors and the number of
/// dropped duplicates.
#[must_use]
pub fn deduplicate(loops: Vec<BoundaryLoop>) -> (Vec<BoundaryLoop>, usize) {
    let mut kept: Vec<BoundaryLoop> = Vec::with_capacity(loops.len());
    let mut dropped = 0;

    for candidate in loops {
        let duplicate = kept.iter().any(|existing| {
            let centroid_dist = (existing.centroid - candidate.centroid).norm();
            if centroid_dist > DUPLICATE_CENTROID_DISTANCE {
                return false;
            }
            let a = existing.point_count();
            let b = candidate.point_count();
            let diff = a.abs_diff(b) as f64;
            diff < DUPLICATE_COUNT_RATIO * a.max(b) as f64
        });

        if duplicate {
            dropped += 1;
        } else {
            kept.push(candidate);
        }
    }

    (kept, dropped)
}

fn centroid_of(points: &[Point2<f64>]) -> Point2<f64> {
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point2::new(sx / n, sy / n)
}

fn perimeter_and_area(points: &[Point2<f64>]) -> (f64, f64) {
    let n = points.len();
    let mut perimeter = 0.0;
    let mut twice_area = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        perimeter += (b - a).norm();
        twice_area += a.x.mul_add(b.y, -(b.x * a.y));
    }
    (perimeter, twice_area / 2.0)
}
