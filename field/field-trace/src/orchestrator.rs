//! Per-frame driver wiring the pipeline to a render collaborator.

use field_lattice::Lattice;
use tracing::warn;

use crate::error::TraceResult;
use crate::params::TraceParams;
use crate::pipeline::extract_boundaries;
use crate::result::BoundarySet;

/// The render-target collaborator.
///
/// The core never references a display surface; whoever owns the overlay
/// implements this and receives each frame's boundary set.
pub trait BoundarySink {
    /// Receive the boundary set for one processed frame.
    fn present(&mut self, set: &BoundarySet);
}

/// What the driver did with a submitted frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameDisposition {
    /// The frame ran through the pipeline and was presented.
    Processed,
    /// The frame arrived while a pass was in flight and was dropped to
    /// bound latency.
    Skipped,
}

/// Drives the extraction pipeline once per delivered frame.
///
/// The pipeline is synchronous, so under single-threaded use every
/// submission processes. The busy guard exists for hosts that re-enter
/// `submit_frame` from within a sink callback chain; such frames are
/// skipped rather than queued, which keeps worst-case latency at one pass.
///
/// # Example
///
/// ```
/// use field_lattice::Lattice;
/// use field_trace::{BoundarySet, BoundarySink, FrameDriver, TraceParams};
///
/// struct Counter(usize);
/// impl BoundarySink for Counter {
///     fn present(&mut self, _set: &BoundarySet) {
///         self.0 += 1;
///     }
/// }
///
/// let mut driver = FrameDriver::new(TraceParams::default().with_rng_seed(0), Counter(0)).unwrap();
/// let frame = Lattice::constant(16, 0.5).unwrap();
/// driver.submit_frame(&frame).unwrap();
/// assert_eq!(driver.sink().0, 1);
/// assert_eq!(driver.frames_processed(), 1);
/// ```
pub struct FrameDriver<S: BoundarySink> {
    params: TraceParams,
    sink: S,
    busy: bool,
    frames_processed: u64,
    frames_skipped: u64,
}

impl<S: BoundarySink> FrameDriver<S> {
    /// Create a driver, validating the parameters once up front.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::InvalidConfig`](crate::TraceError::InvalidConfig)
    /// if the parameters are rejected.
    pub fn new(params: TraceParams, sink: S) -> TraceResult<Self> {
        params.validate()?;
        Ok(Self {
            params,
            sink,
            busy: false,
            frames_processed: 0,
            frames_skipped: 0,
        })
    }

    /// Run one pass over a delivered frame and present the result.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors; the driver stays usable afterwards.
    pub fn submit_frame(&mut self, frame: &Lattice) -> TraceResult<FrameDisposition> {
        if self.busy {
            self.frames_skipped += 1;
            warn!(skipped = self.frames_skipped, "Dropping frame: pass in flight");
            return Ok(FrameDisposition::Skipped);
        }

        self.busy = true;
        let result = extract_boundaries(frame, &self.params);
        self.busy = false;

        let set = result?;
        self.sink.present(&set);
        self.frames_processed += 1;
        Ok(FrameDisposition::Processed)
    }

    /// Frames processed so far.
    #[must_use]
    pub const fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    /// Frames dropped by the busy guard.
    #[must_use]
    pub const fn frames_skipped(&self) -> u64 {
        self.frames_skipped
    }

    /// The driver's parameters.
    #[must_use]
    pub const fn params(&self) -> &TraceParams {
        &self.params
    }

    /// Borrow the sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the driver, returning the sink.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }
}
