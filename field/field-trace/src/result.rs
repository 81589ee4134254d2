//! Per-pass extraction result.

use crate::loops::BoundaryLoop;
use crate::params::TraceParams;
use crate::path::{build_path, export_svg, PathCommand, SvgExportParams};

/// Counters for one extraction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Seeds traced.
    pub seeds: usize,
    /// Streamlines that closed on their seed.
    pub closed: usize,
    /// Open traces that exhausted the step budget.
    pub open_max_steps: usize,
    /// Open traces that left the lattice.
    pub open_left_bounds: usize,
    /// Open traces stuck in flat regions.
    pub open_flat: usize,
    /// Open traces abandoned after producing non-finite coordinates.
    pub open_diverged: usize,
    /// Closed traces rejected as shorter than the minimum loop length.
    pub rejected_short: usize,
    /// Closed loops dropped as duplicates of an earlier loop.
    pub rejected_duplicate: usize,
}

/// The boundary loops produced by one extraction pass.
///
/// This is the sole artifact handed to the rendering collaborator: ordered
/// point sequences plus enough styling and statistics to draw and debug the
/// overlay. It owns its loops and is meant to be discarded when the next
/// frame's set arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundarySet {
    /// Side length of the source lattice.
    pub lattice_size: usize,
    /// Validated, deduplicated boundary loops in seed order.
    pub loops: Vec<BoundaryLoop>,
    /// Per-pass counters.
    pub stats: PassStats,
    /// The parameters that produced this set (styling included).
    pub params: TraceParams,
}

impl BoundarySet {
    /// An empty set for the given lattice size and parameters.
    #[must_use]
    pub fn empty(lattice_size: usize, params: TraceParams) -> Self {
        Self {
            lattice_size,
            loops: Vec::new(),
            stats: PassStats::default(),
            params,
        }
    }

    /// Number of boundary loops.
    #[must_use]
    pub fn loop_count(&self) -> usize {
        self.loops.len()
    }

    /// Whether the pass found no boundaries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loops.is_empty()
    }

    /// Path commands for every loop, honoring the configured smoothing.
    #[must_use]
    pub fn paths(&self) -> Vec<Vec<PathCommand>> {
        self.loops
            .iter()
            .map(|lp| build_path(lp, self.params.stroke.smooth))
            .collect()
    }

    /// Render the whole set as an SVG overlay.
    #[must_use]
    pub fn to_svg(&self, export: &SvgExportParams) -> String {
        export_svg(self, export)
    }
}
